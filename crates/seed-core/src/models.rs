//! Record kinds and their attribute models.
//!
//! Every persisted record is a [`Record`]: a store-assigned [`RecordId`] plus
//! a [`RecordData`] payload. The catalog of kinds is fixed at compile time
//! and enumerated by [`RecordKind::ALL`], which replaces any runtime
//! discovery of model types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Age (in whole years) from which a case is eligible for emancipation
/// planning.
pub const TRANSITION_AGE: u32 = 14;

/// Store-assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId(value)
    }
}

/// Typed view over one record kind.
pub trait Model: Clone + Into<RecordData> {
    /// The kind this model is stored as.
    const KIND: RecordKind;

    /// Extract the model from an attribute payload of the same kind.
    fn from_data(data: RecordData) -> Option<Self>;

    /// Borrow the model from an attribute payload of the same kind.
    fn from_data_ref(data: &RecordData) -> Option<&Self>;
}

macro_rules! record_kinds {
    ($($kind:ident),+ $(,)?) => {
        /// Every record kind known to the generator.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum RecordKind {
            $($kind),+
        }

        impl RecordKind {
            /// Static registry of all record kinds, in name order.
            pub const ALL: &'static [RecordKind] = &[$(RecordKind::$kind),+];

            /// Model name of this kind.
            pub fn name(self) -> &'static str {
                match self {
                    $(RecordKind::$kind => stringify!($kind)),+
                }
            }
        }

        /// Attribute payload of a record, tagged by kind.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "kind", content = "attributes")]
        pub enum RecordData {
            $($kind($kind)),+
        }

        impl RecordData {
            /// Kind of the payload.
            pub fn kind(&self) -> RecordKind {
                match self {
                    $(RecordData::$kind(_) => RecordKind::$kind),+
                }
            }
        }

        $(
            impl Model for $kind {
                const KIND: RecordKind = RecordKind::$kind;

                fn from_data(data: RecordData) -> Option<Self> {
                    match data {
                        RecordData::$kind(model) => Some(model),
                        _ => None,
                    }
                }

                fn from_data_ref(data: &RecordData) -> Option<&Self> {
                    match data {
                        RecordData::$kind(model) => Some(model),
                        _ => None,
                    }
                }
            }

            impl From<$kind> for RecordData {
                fn from(model: $kind) -> Self {
                    RecordData::$kind(model)
                }
            }
        )+
    };
}

record_kinds!(
    AdditionalExpense,
    Address,
    AllCasaAdmin,
    Banner,
    CasaCase,
    CasaCaseContactType,
    CasaCaseEmancipationCategory,
    CasaOrg,
    CaseContact,
    CaseGroup,
    CaseGroupMembership,
    ContactType,
    EmancipationCategory,
    Language,
    MileageRate,
    User,
);

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A persisted record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub data: RecordData,
}

impl Record {
    pub fn new(id: RecordId, data: RecordData) -> Self {
        Self { id, data }
    }

    pub fn kind(&self) -> RecordKind {
        self.data.kind()
    }

    /// Borrow the typed model if this record is of kind `M`.
    pub fn get<M: Model>(&self) -> Option<&M> {
        M::from_data_ref(&self.data)
    }

    /// Convert into a typed record if this record is of kind `M`.
    pub fn into_stored<M: Model>(self) -> Option<Stored<M>> {
        let id = self.id;
        M::from_data(self.data).map(|model| Stored { id, model })
    }
}

/// A persisted record of a known kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<M> {
    pub id: RecordId,
    #[serde(flatten)]
    pub model: M,
}

impl<M: Model> Stored<M> {
    pub fn into_record(self) -> Record {
        Record::new(self.id, self.model.into())
    }
}

impl<M> Deref for Stored<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.model
    }
}

/// Role of an application user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Volunteer,
    Supervisor,
    CasaAdmin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserRole::Volunteer => "volunteer",
            UserRole::Supervisor => "supervisor",
            UserRole::CasaAdmin => "casa_admin",
        };
        f.write_str(name)
    }
}

/// How a case contact took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactMedium {
    InPerson,
    TextEmail,
    Video,
    VoiceOnly,
    Letter,
}

impl ContactMedium {
    pub const ALL: [ContactMedium; 5] = [
        ContactMedium::InPerson,
        ContactMedium::TextEmail,
        ContactMedium::Video,
        ContactMedium::VoiceOnly,
        ContactMedium::Letter,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdditionalExpense {
    pub case_contact_id: RecordId,
    pub other_expense_amount: f64,
    pub other_expenses_describe: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub user_id: RecordId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllCasaAdmin {
    pub email: String,
    pub password: String,
}

/// Organization-wide announcement authored by a CASA admin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub casa_org_id: RecordId,
    pub user_id: RecordId,
    pub name: String,
    pub content: String,
    pub active: bool,
    pub expires_at: Option<NaiveDate>,
}

/// A youth's case within an organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasaCase {
    pub casa_org_id: RecordId,
    pub case_number: String,
    pub birth_month_year_youth: NaiveDate,
    pub date_in_care: NaiveDate,
}

impl CasaCase {
    /// Age of the youth in whole years on `today`.
    pub fn age_in_years(&self, today: NaiveDate) -> u32 {
        today.years_since(self.birth_month_year_youth).unwrap_or(0)
    }

    /// Whether the youth has reached [`TRANSITION_AGE`] on `today`.
    pub fn in_transition_age(&self, today: NaiveDate) -> bool {
        self.age_in_years(today) >= TRANSITION_AGE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasaCaseContactType {
    pub casa_case_id: RecordId,
    pub contact_type_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasaCaseEmancipationCategory {
    pub casa_case_id: RecordId,
    pub emancipation_category_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasaOrg {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseContact {
    pub casa_case_id: RecordId,
    pub creator_id: RecordId,
    pub occurred_at: NaiveDate,
    pub duration_minutes: u32,
    pub medium: ContactMedium,
    pub miles_driven: u32,
    pub want_driving_reimbursement: bool,
}

/// Sibling group. Creating one also creates a [`CaseGroupMembership`] per
/// member case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseGroup {
    pub casa_org_id: RecordId,
    pub name: String,
    pub case_ids: Vec<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseGroupMembership {
    pub case_group_id: RecordId,
    pub casa_case_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactType {
    pub casa_org_id: RecordId,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmancipationCategory {
    pub name: String,
    pub mutually_exclusive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Language {
    pub casa_org_id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MileageRate {
    pub casa_org_id: RecordId,
    pub amount: f64,
    pub effective_date: NaiveDate,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub casa_org_id: RecordId,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    #[serde(skip_serializing)]
    pub password: String,
}
