//! 核心参考数据模型
//!
use refdata_domain::entity::{RecordId, Reference};
use refdata_domain::error::{DomainError, DomainResult};
use refdata_domain::versioned;

fn check_iso_code(iso_code: &str, max: usize) -> DomainResult<()> {
    if iso_code.is_empty() || iso_code.chars().count() > max {
        return Err(DomainError::validation(
            "iso_code",
            format!("expected 1 to {max} characters"),
        ));
    }
    Ok(())
}

#[versioned(named)]
pub struct Timezone {
    pub time_zone: String,
}

#[versioned(named, validate = Self::check)]
pub struct Language {
    pub iso_code: String,
}

impl Language {
    fn check(&self) -> DomainResult<()> {
        check_iso_code(&self.iso_code, 2)
    }
}

#[versioned(named, validate = Self::check)]
pub struct Country {
    pub iso_code: String,
}

impl Country {
    fn check(&self) -> DomainResult<()> {
        check_iso_code(&self.iso_code, 2)
    }
}

// 州与省份共用的地区约束：iso 代码至多 3 位，所属国家为必填外键
fn check_region(iso_code: &str, country: Option<RecordId>) -> DomainResult<()> {
    check_iso_code(iso_code, 3)?;
    if country.is_none() {
        return Err(DomainError::validation("country", "this field is required"));
    }
    Ok(())
}

fn region_references(country: Option<RecordId>) -> Vec<Reference> {
    country
        .map(|id| Reference::Record {
            table: "Country",
            id,
        })
        .into_iter()
        .collect()
}

#[versioned(named, validate = Self::check, foreign_keys = Self::references_country)]
pub struct State {
    pub iso_code: String,
    pub country: Option<RecordId>,
}

impl State {
    fn check(&self) -> DomainResult<()> {
        check_region(&self.iso_code, self.country)
    }

    fn references_country(&self) -> Vec<Reference> {
        region_references(self.country)
    }
}

#[versioned(named, validate = Self::check, foreign_keys = Self::references_country)]
pub struct Province {
    pub iso_code: String,
    pub country: Option<RecordId>,
}

impl Province {
    fn check(&self) -> DomainResult<()> {
        check_region(&self.iso_code, self.country)
    }

    fn references_country(&self) -> Vec<Reference> {
        region_references(self.country)
    }
}

#[versioned(named)]
pub struct Gender {}

#[versioned(named)]
pub struct Title {}

#[versioned(named)]
pub struct Role {}

#[versioned(named)]
pub struct ImageFormat {}

#[versioned(named)]
pub struct DocumentOrientation {}
