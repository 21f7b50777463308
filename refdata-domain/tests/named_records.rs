mod common;

use anyhow::Result as AnyResult;
use common::*;
use refdata_domain::entity::Entity;
use refdata_domain::named::{NamingFields, UNKNOWN};
use refdata_domain::naming::NamingConventions;
use refdata_domain::persist::{InMemoryRepository, NamedRepository, Repository};
use refdata_domain::prioritized::Prioritized;
use refdata_domain::schema::TableSpec;
use refdata_domain::specification::{Active, CreatedBy, Sentinel, Specification};
use refdata_domain::versioned::SaveOptions;

#[test]
fn find_by_name_falls_back_to_unknown() -> AnyResult<()> {
    init_tracing();
    let directory = directory();
    let repo = countries(&directory);

    let mut us = country("United States", "US", alice());
    repo.save(&mut us, SaveOptions::default())?;

    // 哨兵尚未录入
    let err = repo.find_by_name("Atlantis").unwrap_err();
    assert!(err.is_not_found());

    let mut unknown = country(UNKNOWN, "XX", alice());
    repo.save(&mut unknown, SaveOptions::default())?;

    assert_eq!(repo.find_by_name("United States")?.id(), us.id());
    let fallback = repo.find_by_name("Atlantis")?;
    assert_eq!(fallback.naming.name(), Some(UNKNOWN));
    assert_eq!(fallback.id(), unknown.id());
    Ok(())
}

#[test]
fn duplicate_names_are_rejected() -> AnyResult<()> {
    let directory = directory();
    let repo = countries(&directory);

    repo.save(&mut country("Canada", "CA", alice()), SaveOptions::default())?;
    let err = repo
        .save(&mut country("Canada", "C2", bob()), SaveOptions::default())
        .unwrap_err();
    assert!(err.is_constraint_violation());
    assert_eq!(repo.count()?, 1);
    Ok(())
}

#[test]
fn rename_frees_the_old_name() -> AnyResult<()> {
    let directory = directory();
    let repo = countries(&directory);

    let mut burma = country("Burma", "MM", alice());
    repo.save(&mut burma, SaveOptions::default())?;
    burma.naming.name = Some("Myanmar".into());
    repo.save(&mut burma, SaveOptions::default())?;
    assert_eq!(burma.version().value(), 2);

    assert!(repo.get_by_name("Burma")?.is_none());
    assert_eq!(repo.get_by_name("Myanmar")?.and_then(|c| c.id()), burma.id());

    // 旧名称可被其他记录使用
    repo.save(&mut country("Burma", "BU", alice()), SaveOptions::default())?;

    // 改名到已占用的名称失败，原名称保持占用
    burma.naming.name = Some("Burma".into());
    let err = repo.save(&mut burma, SaveOptions::default()).unwrap_err();
    assert!(err.is_constraint_violation());
    assert_eq!(repo.get_by_name("Myanmar")?.and_then(|c| c.id()), burma.id());
    Ok(())
}

#[test]
fn blank_required_name_is_invalid() {
    let directory = directory();
    let repo = countries(&directory);
    let err = repo
        .save(&mut country("", "XX", alice()), SaveOptions::default())
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn optional_names_may_repeat_or_be_absent() -> AnyResult<()> {
    let directory = directory();
    let repo: InMemoryRepository<Title> = InMemoryRepository::new(directory);

    for priority in [3, 1] {
        let mut title = Title {
            versioned: attributed(alice()),
            naming: NamingFields::new("Dr"),
            ..Default::default()
        };
        title.priority = refdata_domain::prioritized::PrioritizedFields::new(priority);
        repo.save(&mut title, SaveOptions::default())?;
    }
    let mut anonymous = Title {
        versioned: attributed(alice()),
        ..Default::default()
    };
    repo.save(&mut anonymous, SaveOptions::default())?;
    assert_eq!(anonymous.display_name(), "");

    assert_eq!(repo.count()?, 3);
    // 同名时取默认排序的第一条（名称相同按主键）
    let found = repo.get_by_name("Dr")?.expect("present");
    assert_eq!(found.priority().value(), 3);

    let titles = repo.list()?;
    assert_eq!(titles[0].naming.name(), None);
    assert_eq!(titles[1].naming.name(), Some("Dr"));
    Ok(())
}

#[test]
fn named_records_list_by_name() -> AnyResult<()> {
    let directory = directory();
    let repo = countries(&directory);
    for (name, iso) in [("Mexico", "MX"), ("Canada", "CA"), ("Brazil", "BR")] {
        repo.save(&mut country(name, iso, alice()), SaveOptions::default())?;
    }
    let names: Vec<_> = repo
        .list()?
        .into_iter()
        .filter_map(|c| c.naming.name)
        .collect();
    assert_eq!(names, ["Brazil", "Canada", "Mexico"]);
    Ok(())
}

#[test]
fn record_specifications() -> AnyResult<()> {
    let directory = directory();
    let repo = countries(&directory);

    let mut unknown = country(UNKNOWN, "XX", alice());
    let mut ca = country("Canada", "CA", bob());
    let mut gone = country("Yugoslavia", "YU", alice());
    gone.versioned.deleted = true;
    for c in [&mut unknown, &mut ca, &mut gone] {
        repo.save(c, SaveOptions::default())?;
    }

    let visible = Active::<Country>::default()
        .and(Sentinel::<Country>::default().not())
        .and(CreatedBy::<Country>::new(alice()).or(CreatedBy::new(bob())));
    let names: Vec<_> = repo
        .list()?
        .into_iter()
        .filter(|c| visible.is_satisfied_by(c))
        .filter_map(|c| c.naming.name)
        .collect();
    assert_eq!(names, ["Canada"]);
    Ok(())
}

#[test]
fn table_spec_for_named_record() -> AnyResult<()> {
    let conventions = NamingConventions::default();
    let spec = TableSpec::for_entity::<Country>("core", &conventions)?;
    assert_eq!(spec.names.db_table, "sl_core_country");
    assert_eq!(spec.names.verbose_name_plural, "countries");
    assert_eq!(spec.ordering, ["name"]);
    assert_eq!(spec.get_latest_by, "update_time");

    let name = spec.column("name").expect("name column");
    assert!(name.unique && !name.nullable);

    let titles = TableSpec::for_entity::<Title>("core", &conventions)?;
    assert!(titles.column("priority").is_some());
    assert!(titles.column("name").is_some_and(|c| c.nullable));

    let zones = TableSpec::for_entity::<Timezone>("core", &conventions)?;
    assert_eq!(zones.ordering, ["id"]);
    assert!(zones.column("name").is_none());
    Ok(())
}
