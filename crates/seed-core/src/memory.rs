//! In-memory record store.
//!
//! Enforces the same uniqueness, parent-existence and business validations
//! the application database applies, so generation runs against it behave
//! like runs against the real store: collisions fail, missing parents fail,
//! and duplicate join rows are reported as
//! [`ValidationCategory::DuplicateAssociation`].

use crate::models::{
    Banner, CasaCase, CasaOrg, CaseGroup, CaseGroupMembership, ContactType, Model, Record,
    RecordData, RecordId, RecordKind, User,
};
use crate::store::{RecordStore, StoreError, ValidationCategory};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::trace;

/// Record store that keeps every table in memory.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: BTreeMap<RecordKind, BTreeMap<RecordId, RecordData>>,
    next_id: i64,
    today: NaiveDate,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store whose clock reads the current UTC date.
    pub fn new() -> Self {
        Self::with_today(Utc::now().date_naive())
    }

    /// Create an empty store with a fixed clock.
    ///
    /// The clock is only consulted for date validations such as banner
    /// expiry.
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            tables: BTreeMap::new(),
            next_id: 1,
            today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn models<'a, M: Model + 'a>(&'a self) -> impl Iterator<Item = (RecordId, &'a M)> + 'a {
        self.tables
            .get(&M::KIND)
            .into_iter()
            .flat_map(|table| table.iter())
            .filter_map(|(id, data)| M::from_data_ref(data).map(|model| (*id, model)))
    }

    /// Records of kind `M` other than `own_id`.
    fn others<'a, M: Model + 'a>(
        &'a self,
        own_id: Option<RecordId>,
    ) -> impl Iterator<Item = (RecordId, &'a M)> + 'a {
        self.models::<M>().filter(move |(id, _)| Some(*id) != own_id)
    }

    fn model<M: Model>(&self, id: RecordId) -> Option<&M> {
        self.tables
            .get(&M::KIND)
            .and_then(|table| table.get(&id))
            .and_then(M::from_data_ref)
    }

    fn exists(&self, kind: RecordKind, id: RecordId) -> bool {
        self.tables
            .get(&kind)
            .is_some_and(|table| table.contains_key(&id))
    }

    fn allocate_id(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, id: RecordId, data: RecordData) {
        self.tables.entry(data.kind()).or_default().insert(id, data);
    }

    /// Validate `data` as if saving it; `own_id` is set for updates.
    fn validate(&self, data: &RecordData, own_id: Option<RecordId>) -> Result<(), StoreError> {
        let kind = data.kind();
        let require = |parent: RecordKind, id: RecordId, label: &str| {
            if self.exists(parent, id) {
                Ok(())
            } else {
                Err(StoreError::validation(
                    kind,
                    ValidationCategory::MissingParent,
                    format!("{label} must exist"),
                ))
            }
        };
        let taken = |label: &str| -> Result<(), StoreError> {
            Err(StoreError::validation(
                kind,
                ValidationCategory::Uniqueness,
                format!("{label} has already been taken"),
            ))
        };
        let invalid = |message: String| -> Result<(), StoreError> {
            Err(StoreError::validation(
                kind,
                ValidationCategory::Invalid,
                message,
            ))
        };

        match data {
            RecordData::AdditionalExpense(expense) => {
                require(RecordKind::CaseContact, expense.case_contact_id, "Case contact")?;
                if expense.other_expense_amount < 0.0 {
                    return invalid("Other expense amount must be positive".to_string());
                }
            }
            RecordData::Address(address) => {
                require(RecordKind::User, address.user_id, "User")?;
                if self
                    .others::<crate::models::Address>(own_id)
                    .any(|(_, other)| other.user_id == address.user_id)
                {
                    return taken("User");
                }
            }
            RecordData::AllCasaAdmin(admin) => {
                if self
                    .others::<crate::models::AllCasaAdmin>(own_id)
                    .any(|(_, other)| other.email.eq_ignore_ascii_case(&admin.email))
                {
                    return taken("Email");
                }
            }
            RecordData::Banner(banner) => {
                require(RecordKind::CasaOrg, banner.casa_org_id, "Casa org")?;
                require(RecordKind::User, banner.user_id, "User")?;
                if banner.active
                    && self
                        .others::<Banner>(own_id)
                        .any(|(_, other)| other.active && other.casa_org_id == banner.casa_org_id)
                {
                    return invalid("Only one banner can be active at a time".to_string());
                }
                if let Some(expires_at) = banner.expires_at {
                    if own_id.is_none() && expires_at <= self.today {
                        return invalid("Expires at must take place in the future".to_string());
                    }
                }
            }
            RecordData::CasaCase(case) => {
                require(RecordKind::CasaOrg, case.casa_org_id, "Casa org")?;
                if self.others::<CasaCase>(own_id).any(|(_, other)| {
                    other.casa_org_id == case.casa_org_id && other.case_number == case.case_number
                }) {
                    return taken("Case number");
                }
            }
            RecordData::CasaCaseContactType(join) => {
                require(RecordKind::CasaCase, join.casa_case_id, "Casa case")?;
                require(RecordKind::ContactType, join.contact_type_id, "Contact type")?;
                if self
                    .others::<crate::models::CasaCaseContactType>(own_id)
                    .any(|(_, other)| other == join)
                {
                    return Err(StoreError::validation(
                        kind,
                        ValidationCategory::DuplicateAssociation,
                        "Contact type has already been taken",
                    ));
                }
            }
            RecordData::CasaCaseEmancipationCategory(join) => {
                require(RecordKind::CasaCase, join.casa_case_id, "Casa case")?;
                require(
                    RecordKind::EmancipationCategory,
                    join.emancipation_category_id,
                    "Emancipation category",
                )?;
                if self
                    .others::<crate::models::CasaCaseEmancipationCategory>(own_id)
                    .any(|(_, other)| other == join)
                {
                    return Err(StoreError::validation(
                        kind,
                        ValidationCategory::DuplicateAssociation,
                        "Emancipation category has already been taken",
                    ));
                }
            }
            RecordData::CasaOrg(org) => {
                if org.name.trim().is_empty() {
                    return invalid("Name can't be blank".to_string());
                }
                if self
                    .others::<CasaOrg>(own_id)
                    .any(|(_, other)| other.name == org.name)
                {
                    return taken("Name");
                }
            }
            RecordData::CaseContact(contact) => {
                require(RecordKind::CasaCase, contact.casa_case_id, "Casa case")?;
                require(RecordKind::User, contact.creator_id, "Creator")?;
            }
            RecordData::CaseGroup(group) => {
                require(RecordKind::CasaOrg, group.casa_org_id, "Casa org")?;
                if group.case_ids.is_empty() {
                    return invalid("Casa cases can't be blank".to_string());
                }
                for case_id in &group.case_ids {
                    match self.model::<CasaCase>(*case_id) {
                        None => require(RecordKind::CasaCase, *case_id, "Casa case")?,
                        Some(case) if case.casa_org_id != group.casa_org_id => {
                            return invalid(format!(
                                "Casa case {case_id} belongs to a different organization"
                            ));
                        }
                        Some(_) => {}
                    }
                }
                if self.others::<CaseGroup>(own_id).any(|(_, other)| {
                    other.casa_org_id == group.casa_org_id
                        && other.name.eq_ignore_ascii_case(&group.name)
                }) {
                    return taken("Name");
                }
            }
            RecordData::CaseGroupMembership(membership) => {
                require(RecordKind::CaseGroup, membership.case_group_id, "Case group")?;
                require(RecordKind::CasaCase, membership.casa_case_id, "Casa case")?;
            }
            RecordData::ContactType(contact_type) => {
                require(RecordKind::CasaOrg, contact_type.casa_org_id, "Casa org")?;
                if self.others::<ContactType>(own_id).any(|(_, other)| {
                    other.casa_org_id == contact_type.casa_org_id
                        && other.name == contact_type.name
                }) {
                    return taken("Name");
                }
            }
            RecordData::EmancipationCategory(category) => {
                if self
                    .others::<crate::models::EmancipationCategory>(own_id)
                    .any(|(_, other)| other.name == category.name)
                {
                    return taken("Name");
                }
            }
            RecordData::Language(language) => {
                require(RecordKind::CasaOrg, language.casa_org_id, "Casa org")?;
                if self
                    .others::<crate::models::Language>(own_id)
                    .any(|(_, other)| {
                        other.casa_org_id == language.casa_org_id
                            && other.name.eq_ignore_ascii_case(&language.name)
                    })
                {
                    return taken("Name");
                }
            }
            RecordData::MileageRate(rate) => {
                require(RecordKind::CasaOrg, rate.casa_org_id, "Casa org")?;
                if rate.is_active
                    && self
                        .others::<crate::models::MileageRate>(own_id)
                        .any(|(_, other)| {
                            other.is_active
                                && other.casa_org_id == rate.casa_org_id
                                && other.effective_date == rate.effective_date
                        })
                {
                    return taken("Effective date");
                }
            }
            RecordData::User(user) => {
                require(RecordKind::CasaOrg, user.casa_org_id, "Casa org")?;
                if self
                    .others::<User>(own_id)
                    .any(|(_, other)| other.email.eq_ignore_ascii_case(&user.email))
                {
                    return taken("Email");
                }
            }
        }

        Ok(())
    }

    fn sync_memberships(&mut self, group_id: RecordId, group: &CaseGroup) {
        if let Some(table) = self.tables.get_mut(&RecordKind::CaseGroupMembership) {
            table.retain(|_, data| {
                CaseGroupMembership::from_data_ref(data)
                    .map_or(true, |membership| membership.case_group_id != group_id)
            });
        }
        for case_id in &group.case_ids {
            let membership_id = self.allocate_id();
            self.insert(
                membership_id,
                CaseGroupMembership {
                    case_group_id: group_id,
                    casa_case_id: *case_id,
                }
                .into(),
            );
        }
    }
}

impl RecordStore for MemoryStore {
    fn create(&mut self, data: RecordData) -> Result<Record, StoreError> {
        self.validate(&data, None)?;

        let id = self.allocate_id();
        if let RecordData::CaseGroup(group) = &data {
            let group = group.clone();
            self.insert(id, data.clone());
            self.sync_memberships(id, &group);
        } else {
            self.insert(id, data.clone());
        }

        trace!("Created {} {}", data.kind(), id);
        Ok(Record::new(id, data))
    }

    fn find(&self, kind: RecordKind, id: RecordId) -> Result<Record, StoreError> {
        self.tables
            .get(&kind)
            .and_then(|table| table.get(&id))
            .map(|data| Record::new(id, data.clone()))
            .ok_or(StoreError::NotFound { kind, id })
    }

    fn update(&mut self, record: Record) -> Result<Record, StoreError> {
        let kind = record.kind();
        if !self.exists(kind, record.id) {
            return Err(StoreError::NotFound {
                kind,
                id: record.id,
            });
        }
        self.validate(&record.data, Some(record.id))?;

        if let RecordData::CaseGroup(group) = &record.data {
            let group = group.clone();
            self.sync_memberships(record.id, &group);
        }
        self.insert(record.id, record.data.clone());

        trace!("Updated {} {}", kind, record.id);
        Ok(record)
    }

    fn query_all(&self, kind: RecordKind) -> Vec<Record> {
        self.tables
            .get(&kind)
            .map(|table| {
                table
                    .iter()
                    .map(|(id, data)| Record::new(*id, data.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn count(&self, kind: RecordKind) -> u64 {
        self.tables
            .get(&kind)
            .map_or(0, |table| table.len() as u64)
    }
}
