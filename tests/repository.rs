use constancias::domain::constancia::{ConstanciaEstado, ConstanciaTipo, NewConstancia};
use constancias::domain::product::{NewProduct, UpdateProduct};
use constancias::domain::user::{NewUser, UpdateUser, UserRole};
use constancias::repository::constancia::DieselConstanciaRepository;
use constancias::repository::product::DieselProductRepository;
use constancias::repository::user::DieselUserRepository;
use constancias::repository::{
    ConstanciaListQuery, ConstanciaReader, ConstanciaWriter, ProductReader, ProductWriter,
    UserReader, UserWriter,
};

mod common;

fn nueva_constancia(nombre: &str, user_id: i32) -> NewConstancia {
    NewConstancia::new(
        nombre.to_string(),
        "García".to_string(),
        "12345678".to_string(),
        ConstanciaTipo::Laboral,
        "Trámite bancario personal".to_string(),
        user_id,
        "ana@example.com".to_string(),
    )
    .unwrap()
}

#[test]
fn test_constancia_repository_crud() {
    let test_db = common::TestDb::new("test_constancia_repository_crud.db");
    let repo = DieselConstanciaRepository::new(test_db.pool());

    let first = repo.create(&nueva_constancia("Ana", 1)).unwrap();
    let second = repo.create(&nueva_constancia("Luis", 2)).unwrap();

    assert_eq!(first.estado, ConstanciaEstado::Pendiente);
    assert_ne!(first.public_id, second.public_id);

    let all = repo.list(ConstanciaListQuery::new()).unwrap();
    assert_eq!(all.len(), 2);

    let scoped = repo.list(ConstanciaListQuery::new().for_user(2)).unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].nombre, "Luis");

    let approved = repo
        .set_estado(first.id, ConstanciaEstado::Aprobada)
        .unwrap();
    assert_eq!(approved.estado, ConstanciaEstado::Aprobada);
    assert!(approved.is_printable());

    repo.delete(second.id).unwrap();
    assert!(repo.get_by_id(second.id).unwrap().is_none());
    assert!(repo.delete(second.id).is_err());
}

#[test]
fn test_user_repository_login_sync_keeps_role() {
    let test_db = common::TestDb::new("test_user_repository_sync.db");
    let repo = DieselUserRepository::new(test_db.pool());

    let created = repo
        .create_or_update(
            &NewUser::new("ana@example.com".into(), "Ana".into(), UserRole::Usuario).unwrap(),
        )
        .unwrap();
    assert_eq!(created.role, UserRole::Usuario);

    // promote via the panel
    let promoted = repo
        .update(
            created.id,
            &UpdateUser::new("Ana".into(), UserRole::Planillero).unwrap(),
        )
        .unwrap();
    assert_eq!(promoted.role, UserRole::Planillero);

    // a later login sync refreshes the name but never downgrades the role
    let synced = repo
        .create_or_update(
            &NewUser::new(
                "ana@example.com".into(),
                "Ana María".into(),
                UserRole::Usuario,
            )
            .unwrap(),
        )
        .unwrap();
    assert_eq!(synced.id, created.id);
    assert_eq!(synced.name, "Ana María");
    assert_eq!(synced.role, UserRole::Planillero);

    let found = repo.get_by_email("ana@example.com").unwrap().unwrap();
    assert_eq!(found.id, created.id);
}

#[test]
fn test_user_list_is_ordered_by_name() {
    let test_db = common::TestDb::new("test_user_repository_order.db");
    let repo = DieselUserRepository::new(test_db.pool());

    for (email, name) in [
        ("c@example.com", "Carlos"),
        ("a@example.com", "Ana"),
        ("b@example.com", "Berta"),
    ] {
        repo.create_or_update(
            &NewUser::new(email.into(), name.into(), UserRole::Usuario).unwrap(),
        )
        .unwrap();
    }

    let names: Vec<String> = repo.list().unwrap().into_iter().map(|u| u.name).collect();
    assert_eq!(names, ["Ana", "Berta", "Carlos"]);
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let repo = DieselProductRepository::new(test_db.pool());

    let slow = repo
        .create(&NewProduct::new(1, "Té".into(), 5.0, 2).unwrap())
        .unwrap();
    let best = repo
        .create(&NewProduct::new(1, "Café".into(), 10.0, 30).unwrap())
        .unwrap();
    repo.create(&NewProduct::new(2, "Pan".into(), 1.0, 100).unwrap())
        .unwrap();

    // best sellers first, scoped to the owner
    let mine = repo.list_by_user(1).unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].id, best.id);

    let updated = repo
        .update(slow.id, &UpdateProduct::new("Té verde".into(), 6.0, 3).unwrap())
        .unwrap();
    assert_eq!(updated.name, "Té verde");
    assert_eq!(updated.profit(), 18.0);

    repo.delete(best.id).unwrap();
    assert!(repo.get_by_id(best.id).unwrap().is_none());
    assert_eq!(repo.list_by_user(1).unwrap().len(), 1);
}
