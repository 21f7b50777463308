mod models;

use models::*;
use refdata_application::config::load_settings;
use refdata_application::context::AppContext;
use refdata_application::{AdminRegistry, ModelAdmin, RecordService};
use refdata_domain::entity::{Entity, SiteId, UserId};
use refdata_domain::named::{NamingFields, UNKNOWN};
use refdata_domain::persist::{Directory, InMemoryRepository, NamedRepository, Repository};
use refdata_domain::schema::TableSpec;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const NAMESPACE: &str = "core";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path = std::env::var("REFDATA_CONFIG").ok();
    let settings = load_settings(config_path.as_deref().map(Path::new))?;

    let admin_user = UserId::new(1);
    let editor = UserId::new(2);
    let site = SiteId::new(1);
    let directory = Arc::new(Directory::new());
    directory.register_user(admin_user);
    directory.register_user(editor);
    directory.register_site(site);

    let superuser = AppContext::builder()
        .user(admin_user)
        .site(site)
        .is_superuser(true)
        .build();
    let staff = AppContext::builder().user(editor).site(site).build();

    // 表名约定
    for spec in [
        TableSpec::for_entity::<Timezone>(NAMESPACE, &settings.naming)?,
        TableSpec::for_entity::<Language>(NAMESPACE, &settings.naming)?,
        TableSpec::for_entity::<Country>(NAMESPACE, &settings.naming)?,
        TableSpec::for_entity::<State>(NAMESPACE, &settings.naming)?,
        TableSpec::for_entity::<Province>(NAMESPACE, &settings.naming)?,
        TableSpec::for_entity::<Gender>(NAMESPACE, &settings.naming)?,
        TableSpec::for_entity::<Title>(NAMESPACE, &settings.naming)?,
        TableSpec::for_entity::<Role>(NAMESPACE, &settings.naming)?,
        TableSpec::for_entity::<ImageFormat>(NAMESPACE, &settings.naming)?,
        TableSpec::for_entity::<DocumentOrientation>(NAMESPACE, &settings.naming)?,
    ] {
        println!(
            "{:<20} {:<32} {} / {}",
            spec.type_name,
            spec.names.db_table,
            spec.names.verbose_name,
            spec.names.verbose_name_plural
        );
    }

    // 管理注册与国家录入
    let registry = AdminRegistry::new();
    let countries = Arc::new(InMemoryRepository::<Country>::new(directory.clone()));
    let country_admin = ModelAdmin::<Country, _>::named(countries.clone(), &settings.admin);
    registry.register(&country_admin)?;

    for (name, alias, iso_code) in [
        (UNKNOWN, None, "XX"),
        ("United States of America", Some("USA"), "US"),
        ("Canada", None, "CA"),
        ("Mexico", None, "MX"),
    ] {
        let mut naming = NamingFields::new(name);
        naming.alias = alias.map(str::to_string);
        let mut country = Country {
            naming,
            iso_code: iso_code.to_string(),
            ..Default::default()
        };
        country_admin.save_model(&superuser, &mut country)?;
    }

    let canada: Country = countries.find_by_name("Canada")?;
    let atlantis: Country = countries.find_by_name("Atlantis")?;
    println!(
        "found: {} (fallback for Atlantis: {})",
        canada.display_name(),
        atlantis.display_name()
    );

    // 带外键的记录经由服务创建
    let states = Arc::new(InMemoryRepository::<State>::new(directory.clone()));
    let state_admin = ModelAdmin::<State, _>::named(states.clone(), &settings.admin);
    registry.register(&state_admin)?;
    let state_service = RecordService::<State, _>::new(states.clone());
    let ontario = state_service.create(
        &staff,
        match json!({"name": "Ontario", "iso_code": "ON", "country": canada.id()}) {
            serde_json::Value::Object(fields) => fields,
            _ => Default::default(),
        },
    )?;
    println!("created: {}", serde_json::to_string(&ontario)?);

    let provinces = Arc::new(InMemoryRepository::<Province>::new(directory.clone()));
    let province_admin = ModelAdmin::<Province, _>::named(provinces.clone(), &settings.admin);
    registry.register(&province_admin)?;
    let mut quebec = Province {
        naming: NamingFields::new("Quebec"),
        iso_code: "QC".to_string(),
        country: canada.id(),
        ..Default::default()
    };
    province_admin.save_model(&staff, &mut quebec)?;
    println!("created: {} (version {})", quebec.display_name(), quebec.version());

    if let Err(err) = Repository::<Country>::delete(&countries, canada.id().unwrap_or_default()) {
        println!("delete Canada refused: {err}");
    }

    println!("admins: {:?}", registry.registered());
    println!("columns: {:?}", country_admin.column_headers());
    for row in country_admin.changelist(&staff)? {
        println!("  {:?}", row.columns);
    }

    info!(
        countries = country_admin.queryset(&superuser)?.len(),
        visible_to_staff = country_admin.queryset(&staff)?.len(),
        "demo finished"
    );
    Ok(())
}
