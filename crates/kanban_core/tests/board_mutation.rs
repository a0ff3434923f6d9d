use kanban_core::{
    Board, BoardError, Client, ClientRecord, IntegrityError, Lookup, MemoryDataSource, Project,
    ProjectRecord, RecordId, Sticker, User, UserRecord,
};
use serde_json::json;

fn empty_board() -> Board<MemoryDataSource> {
    Board::empty(MemoryDataSource::default())
}

#[test]
fn add_project_attaches_the_canonical_client() {
    let mut board = empty_board();
    assert!(board.add_client(Client::new(1, "Acme")));

    let added = board
        .add_project(Project::new(10, "Site").with_client_id("1"))
        .unwrap();
    assert!(added);

    let project = board.get_project(10).unwrap();
    let client = board.get_client(1).unwrap();
    assert_eq!(project.client_id(), Some(client.id()));
    assert_eq!(project.client_name(), Some("Acme"));
    assert!(client.has_project(project.id()));
    assert_eq!(board.client_of(10).unwrap(), Some(client));
}

#[test]
fn add_project_with_unknown_client_fails_and_changes_nothing() {
    let mut board = empty_board();
    let err = board
        .add_project(Project::new(10, "Site").with_client_id(5))
        .unwrap_err();
    assert!(matches!(
        err,
        BoardError::Integrity(IntegrityError::UnknownClient { .. })
    ));
    assert!(!board.has_project(10));
}

#[test]
fn adds_are_idempotent() {
    let mut board = empty_board();

    assert!(board.add_client(Client::new(1, "Acme")));
    assert!(!board.add_client(Client::new(1, "Acme")));
    assert!(board.add_project(Project::new(10, "Site")).unwrap());
    assert!(!board.add_project(Project::new(10, "Other")).unwrap());
    assert!(board.add_user(User::new(1).with_name("Ada")));
    assert!(!board.add_user(User::new(1).with_name("Ada")));
    assert!(board.add_user(User::new(2).with_uid("u-1")));
    assert!(!board.add_user(User::new(3).with_uid("u-1")));

    assert_eq!(board.clients().count(), 1);
    assert_eq!(board.projects().count(), 1);
    assert_eq!(board.get_project(10).unwrap().name(), Some("Site"));
    assert_eq!(board.users().len(), 2);
}

#[test]
fn set_users_admits_only_active_and_not_inactive() {
    let mut board = empty_board();
    let records: Vec<UserRecord> = serde_json::from_value(json!([
        { "id": 1, "name": "Active", "active": true, "inactive": false },
        { "id": 2, "name": "Both", "active": true, "inactive": true },
        { "id": 3, "name": "Neither" },
        { "id": 4, "name": "Loose", "active": "1", "inactive": "0" }
    ]))
    .unwrap();

    assert_eq!(board.set_users(records), 2);
    assert!(board.get_user(1).is_ok());
    assert!(board.get_user(2).is_err());
    assert!(board.get_user(3).is_err());
    assert!(board.get_user(4).is_ok());
}

#[test]
fn set_clients_and_projects_delegate_to_single_adds() {
    let mut board = empty_board();
    let clients: Vec<ClientRecord> = serde_json::from_value(json!([
        { "id": 1, "name": "Acme" },
        { "id": 1, "name": "Dup" }
    ]))
    .unwrap();
    assert_eq!(board.set_clients(clients), 1);

    let projects: Vec<ProjectRecord> = serde_json::from_value(json!([
        { "id": 10, "name": "Site", "clientID": 1 },
        { "id": 11, "name": "Ops" },
        { "id": 10, "name": "Dup" }
    ]))
    .unwrap();
    assert_eq!(board.set_projects(projects).unwrap(), 2);
    assert_eq!(board.get_client(1).unwrap().project_ids(), &[RecordId::from(10)]);
}

#[test]
fn lookups_fail_with_the_searched_identifier() {
    let board = empty_board();

    match board.get_project(42).unwrap_err() {
        BoardError::NotFound(Lookup::Project(id)) => assert_eq!(id, RecordId::from(42)),
        other => panic!("unexpected error: {other}"),
    }
    match board.get_client("c-9").unwrap_err() {
        BoardError::NotFound(Lookup::Client(id)) => assert_eq!(id, RecordId::from("c-9")),
        other => panic!("unexpected error: {other}"),
    }
    let err = board.find_user("ada@example.com").unwrap_err();
    assert!(err.to_string().contains("ada@example.com"));
}

#[test]
fn user_lookups_accept_any_identifying_attribute() {
    let mut board = empty_board();
    board.add_user(
        User::new(7)
            .with_name("Ada")
            .with_email("ada@example.com")
            .with_api_token("tok-7"),
    );

    for identifier in ["7", "Ada", "ada@example.com", "tok-7"] {
        assert_eq!(board.user_api_token(identifier).unwrap(), Some("tok-7"));
    }
    assert_eq!(board.user_by_email("ada@example.com").unwrap().name(), Some("Ada"));
    assert_eq!(board.user_by_name("Ada").unwrap().email(), Some("ada@example.com"));
    assert!(board.user_by_name("ada@example.com").is_err());
}

#[test]
fn update_project_relinks_both_sides() {
    let mut board = empty_board();
    board.add_client(Client::new(1, "Acme"));
    board.add_client(Client::new(2, "Globex"));
    board
        .add_project(Project::new(10, "Site").with_client_id(1))
        .unwrap();

    let mut replacement = Project::new(999, "Site v2").with_client_id(2);
    replacement.hide();
    replacement.add_sticker(Sticker::new("new"));
    board.update_project(10, replacement).unwrap();

    let project = board.get_project(10).unwrap();
    assert_eq!(project.name(), Some("Site v2"));
    assert!(project.is_hidden());
    assert_eq!(project.client_name(), Some("Globex"));
    assert!(!board.get_client(1).unwrap().has_project(&RecordId::from(10)));
    assert!(board.get_client(2).unwrap().has_project(&RecordId::from(10)));
    assert!(!board.has_project(999));

    board.update_project(10, Project::new(10, "Unowned")).unwrap();
    assert_eq!(board.get_project(10).unwrap().client(), None);
    assert!(board.get_client(2).unwrap().project_ids().is_empty());

    assert!(matches!(
        board.update_project(11, Project::new(11, "Missing")),
        Err(BoardError::NotFound(Lookup::Project(_)))
    ));
}

#[test]
fn client_project_matches_id_then_name() {
    let mut board = empty_board();
    board.add_client(Client::new(1, "Acme"));
    board
        .add_project(Project::new(10, "Site").with_client_id(1))
        .unwrap();
    board.add_project(Project::new(11, "Unowned")).unwrap();

    assert_eq!(board.client_project(1, "10").unwrap().name(), Some("Site"));
    assert_eq!(board.client_project(1, "Site").unwrap().id(), &RecordId::from(10));
    assert!(matches!(
        board.client_project(1, "Unowned"),
        Err(BoardError::NotFound(Lookup::ClientProject { .. }))
    ));
}

#[test]
fn visibility_changes_go_through_the_board() {
    let mut board = empty_board();
    board.add_project(Project::new(10, "Site")).unwrap();

    board.hide_project(10).unwrap();
    assert!(board.get_project(10).unwrap().is_hidden());
    board.show_project(10).unwrap();
    assert!(!board.get_project(10).unwrap().is_hidden());
    assert!(board.hide_project(11).is_err());
}

#[test]
fn remove_user_from_projects_except_keeps_the_excepted_project() {
    let mut board = empty_board();
    for id in [1, 2, 3] {
        board.add_project(Project::new(id, format!("P{id}"))).unwrap();
        board.add_user_to_project(42, id).unwrap();
        board.add_user_to_project(7, id).unwrap();
    }

    board.remove_user_from_projects_except(42, Some(&RecordId::from(2)));

    let user = RecordId::from(42);
    assert!(!board.get_project(1).unwrap().has_user(&user));
    assert!(board.get_project(2).unwrap().has_user(&user));
    assert!(!board.get_project(3).unwrap().has_user(&user));
    assert_eq!(board.get_project(3).unwrap().user_ids(), &[RecordId::from(7)]);

    board.remove_user_from_projects_except(42, None);
    assert!(!board.get_project(2).unwrap().has_user(&user));
}
