use refdata_domain::entity::{Entity, RecordId, Reference};
use refdata_domain::error::{DomainError, DomainResult};
use refdata_domain::named::{NameRule, Named, NamingFields};
use refdata_domain::prioritized::Prioritized;
use refdata_domain::versioned;

#[versioned(named)]
struct Country {
    iso_code: String,
}

#[versioned(optional_named, prioritized)]
struct Title {}

#[versioned(named, validate = Self::check_iso, foreign_keys = Self::country_ref)]
struct Province {
    iso_code: String,
    country: Option<RecordId>,
}

impl Province {
    fn check_iso(&self) -> DomainResult<()> {
        if self.iso_code.len() > 3 {
            return Err(DomainError::validation("iso_code", "at most 3 characters"));
        }
        Ok(())
    }

    fn country_ref(&self) -> Vec<Reference> {
        self.country
            .map(|id| Reference::Record { table: "Country", id })
            .into_iter()
            .collect()
    }
}

fn main() {
    assert_eq!(Country::NAME_RULE, NameRule::Required);
    assert_eq!(Title::NAME_RULE, NameRule::Optional);

    let mut country = Country::default();
    assert!(country.validate().is_err());
    country.naming = NamingFields::new("United States").with_alias("USA");
    country.iso_code = "US".into();
    assert!(country.validate().is_ok());
    assert_eq!(country.unique_name(), Some("United States"));
    assert_eq!(country.display_name(), "USA");
    assert_eq!(country.naming().name(), Some("United States"));

    let title = Title::default();
    assert!(title.validate().is_ok());
    assert_eq!(title.unique_name(), None);
    assert_eq!(title.priority().value(), 0);
    assert_eq!(title.display_name(), "");

    let mut province = Province::default();
    province.naming = NamingFields::new("Ontario");
    province.iso_code = "ONTX".into();
    assert!(province.validate().is_err());
    province.iso_code = "ON".into();
    province.country = Some(RecordId::new(1));
    assert!(province.validate().is_ok());
    assert_eq!(province.foreign_keys().len(), 1);
}
