#![allow(dead_code)]

use refdata_domain::entity::{RecordId, Reference, SiteId, UserId};
use refdata_domain::persist::{Directory, InMemoryRepository};
use refdata_domain::versioned;
use refdata_domain::versioned::VersionedFields;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn alice() -> UserId {
    UserId::new(1)
}

pub fn bob() -> UserId {
    UserId::new(2)
}

pub fn main_site() -> SiteId {
    SiteId::new(1)
}

/// 已登记 alice、bob 与主站点的目录
pub fn directory() -> Arc<Directory> {
    let directory = Arc::new(Directory::new());
    directory.register_user(alice());
    directory.register_user(bob());
    directory.register_site(main_site());
    directory
}

pub fn attributed(user: UserId) -> VersionedFields {
    VersionedFields::attributed(user, main_site())
}

#[versioned]
pub struct Timezone {
    pub offset_minutes: i32,
}

#[versioned(named)]
pub struct Country {
    pub iso_code: String,
}

#[versioned(named, foreign_keys = Self::country_ref)]
pub struct Province {
    pub iso_code: String,
    pub country: Option<RecordId>,
}

impl Province {
    fn country_ref(&self) -> Vec<Reference> {
        self.country
            .map(|id| Reference::Record {
                table: "Country",
                id,
            })
            .into_iter()
            .collect()
    }
}

#[versioned(optional_named, prioritized)]
pub struct Title {}

pub fn country(name: &str, iso_code: &str, user: UserId) -> Country {
    Country {
        versioned: attributed(user),
        naming: refdata_domain::named::NamingFields::new(name),
        iso_code: iso_code.to_string(),
    }
}

pub fn countries(directory: &Arc<Directory>) -> InMemoryRepository<Country> {
    InMemoryRepository::new(directory.clone())
}
