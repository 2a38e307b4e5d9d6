use miso_core::db::open_db_in_memory;
use miso_core::model::preferences::{BOARD_HEIGHT_COLLAPSED, BOARD_HEIGHT_EXPANDED};
use miso_core::{
    PreferenceRepository, PreferenceService, RepoError, SqlitePreferenceRepository, Theme,
};

#[test]
fn theme_defaults_to_light_and_toggle_persists() {
    let conn = open_db_in_memory().unwrap();
    let service = PreferenceService::new(SqlitePreferenceRepository::new(&conn));

    assert_eq!(service.theme().unwrap(), Theme::Light);
    assert_eq!(service.toggle_theme().unwrap(), Theme::Dark);

    let reopened = PreferenceService::new(SqlitePreferenceRepository::new(&conn));
    assert_eq!(reopened.theme().unwrap(), Theme::Dark);
    assert_eq!(reopened.toggle_theme().unwrap(), Theme::Light);
}

#[test]
fn page_expansion_switches_board_height() {
    let conn = open_db_in_memory().unwrap();
    let service = PreferenceService::new(SqlitePreferenceRepository::new(&conn));

    assert_eq!(service.board_min_height().unwrap(), BOARD_HEIGHT_COLLAPSED);
    assert!(service.toggle_page_expanded().unwrap());
    assert_eq!(service.board_min_height().unwrap(), BOARD_HEIGHT_EXPANDED);
    assert!(!service.toggle_page_expanded().unwrap());
}

#[test]
fn page_number_input_falls_back_to_first_page() {
    let conn = open_db_in_memory().unwrap();
    let service = PreferenceService::new(SqlitePreferenceRepository::new(&conn));

    assert_eq!(service.current_page().unwrap(), 1);
    assert_eq!(service.set_current_page(" 7 ").unwrap(), 7);
    assert_eq!(service.current_page().unwrap(), 7);
    assert_eq!(service.set_current_page("abc").unwrap(), 1);
    assert_eq!(service.set_current_page("-3").unwrap(), 1);
    assert_eq!(service.current_page().unwrap(), 1);
}

#[test]
fn corrupted_stored_value_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::new(&conn);
    repo.set_preference("theme", "sepia").unwrap();

    let service = PreferenceService::new(repo);
    assert!(matches!(service.theme(), Err(RepoError::InvalidData(_))));
}

#[test]
fn removing_missing_preference_is_not_an_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::new(&conn);

    repo.remove_preference("history.current_snapshot").unwrap();
    repo.set_preference("a", "1").unwrap();
    repo.set_preference("a", "2").unwrap();
    assert_eq!(repo.get_preference("a").unwrap().as_deref(), Some("2"));
    repo.remove_preference("a").unwrap();
    assert_eq!(repo.get_preference("a").unwrap(), None);
}
