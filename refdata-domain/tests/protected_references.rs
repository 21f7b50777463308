mod common;

use anyhow::Result as AnyResult;
use common::*;
use refdata_domain::entity::{Entity, RecordId, Reference, UserId};
use refdata_domain::named::NamingFields;
use refdata_domain::persist::{InMemoryRepository, Repository};
use refdata_domain::versioned::SaveOptions;

fn province(name: &str, country: Option<RecordId>) -> Province {
    Province {
        versioned: attributed(alice()),
        naming: NamingFields::new(name),
        iso_code: "ON".into(),
        country,
    }
}

#[test]
fn referenced_user_cannot_be_removed() -> AnyResult<()> {
    init_tracing();
    let directory = directory();
    let repo = countries(&directory);

    let carol = UserId::new(3);
    directory.register_user(carol);
    let mut ca = country("Canada", "CA", carol);
    repo.save(&mut ca, SaveOptions::default())?;

    let err = directory.remove_user(carol).unwrap_err();
    assert!(err.is_constraint_violation());
    assert!(directory.remove_site(main_site()).is_err());

    // 删除记录后引用释放
    repo.delete(ca.id().expect("persisted"))?;
    directory.remove_user(carol)?;
    Ok(())
}

#[test]
fn reattribution_moves_references() -> AnyResult<()> {
    let directory = directory();
    let repo = countries(&directory);

    let mut ca = country("Canada", "CA", alice());
    repo.save(&mut ca, SaveOptions::default())?;
    assert_eq!(directory.reference_count(&Reference::User(alice())), 1);

    ca.versioned.creation_user = Some(bob());
    let options = SaveOptions::builder()
        .update_user(bob())
        .effective_user(bob())
        .build();
    repo.save(&mut ca, options)?;

    assert_eq!(directory.reference_count(&Reference::User(alice())), 0);
    assert_eq!(directory.reference_count(&Reference::User(bob())), 1);
    directory.remove_user(alice())?;
    Ok(())
}

#[test]
fn referenced_record_cannot_be_deleted() -> AnyResult<()> {
    let directory = directory();
    let countries = countries(&directory);
    let provinces: InMemoryRepository<Province> = InMemoryRepository::new(directory.clone());

    let mut ca = country("Canada", "CA", alice());
    countries.save(&mut ca, SaveOptions::default())?;
    let ca_id = ca.id().expect("persisted");

    let mut on = province("Ontario", Some(ca_id));
    provinces.save(&mut on, SaveOptions::default())?;

    let err = countries.delete(ca_id).unwrap_err();
    assert!(err.is_constraint_violation());
    assert!(countries.get_or_none(ca_id)?.is_some());

    provinces.delete(on.id().expect("persisted"))?;
    let removed = countries.delete(ca_id)?;
    assert_eq!(removed.naming.name(), Some("Canada"));
    assert_eq!(countries.count()?, 0);
    Ok(())
}

#[test]
fn dangling_foreign_key_is_rejected() {
    let directory = directory();
    let provinces: InMemoryRepository<Province> = InMemoryRepository::new(directory.clone());

    let err = provinces
        .save(&mut province("Atlantis", Some(RecordId::new(42))), SaveOptions::default())
        .unwrap_err();
    assert!(err.is_constraint_violation());
    assert_eq!(directory.reference_count(&Reference::User(alice())), 0);
}

#[test]
fn deleting_missing_record_is_not_found() {
    let directory = directory();
    let repo = countries(&directory);
    assert!(repo.delete(RecordId::new(7)).unwrap_err().is_not_found());
}
