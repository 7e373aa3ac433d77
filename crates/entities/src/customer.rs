use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use devicehub_core::{
    CustomerId, Entity, EntityId, HasOwnerId, TenantId, ValueObject, Versioned,
};

use crate::additional_info;

/// Key of the public-visibility flag inside `additionalInfo`.
pub const IS_PUBLIC_KEY: &str = "isPublic";

/// Contact information for a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub address2: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A customer: sub-owner beneath a tenant that may own devices.
///
/// `name` is an alias of `title`. On the wire both are emitted; on input
/// `title` wins and `name` is only used when `title` is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    id: Option<CustomerId>,
    created_time: Option<i64>,
    tenant_id: Option<TenantId>,
    title: Option<String>,
    contact: ContactInfo,
    additional_info: Option<Value>,
    external_id: Option<CustomerId>,
    version: Option<u64>,
}

/// Lightweight customer reference (e.g. embedded in assignment lists).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortCustomerInfo {
    pub customer_id: CustomerId,
    pub title: Option<String>,
    pub is_public: bool,
}

impl ValueObject for ShortCustomerInfo {}

impl Customer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: CustomerId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<CustomerId> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<CustomerId>>) {
        self.id = id.into();
    }

    pub fn created_time(&self) -> Option<i64> {
        self.created_time
    }

    pub fn set_created_time(&mut self, created_time: i64) {
        self.created_time = Some(created_time);
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    pub fn set_tenant_id(&mut self, tenant_id: impl Into<Option<TenantId>>) {
        self.tenant_id = tenant_id.into();
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title<S: Into<String>>(&mut self, title: impl Into<Option<S>>) {
        self.title = title.into().map(Into::into);
    }

    /// Alias of [`Customer::title`].
    pub fn name(&self) -> Option<&str> {
        self.title()
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactInfo {
        &mut self.contact
    }

    pub fn country(&self) -> Option<&str> {
        self.contact.country.as_deref()
    }

    pub fn set_country<S: Into<String>>(&mut self, country: impl Into<Option<S>>) {
        self.contact.country = country.into().map(Into::into);
    }

    pub fn state(&self) -> Option<&str> {
        self.contact.state.as_deref()
    }

    pub fn set_state<S: Into<String>>(&mut self, state: impl Into<Option<S>>) {
        self.contact.state = state.into().map(Into::into);
    }

    pub fn city(&self) -> Option<&str> {
        self.contact.city.as_deref()
    }

    pub fn set_city<S: Into<String>>(&mut self, city: impl Into<Option<S>>) {
        self.contact.city = city.into().map(Into::into);
    }

    pub fn address(&self) -> Option<&str> {
        self.contact.address.as_deref()
    }

    pub fn set_address<S: Into<String>>(&mut self, address: impl Into<Option<S>>) {
        self.contact.address = address.into().map(Into::into);
    }

    pub fn address2(&self) -> Option<&str> {
        self.contact.address2.as_deref()
    }

    pub fn set_address2<S: Into<String>>(&mut self, address2: impl Into<Option<S>>) {
        self.contact.address2 = address2.into().map(Into::into);
    }

    pub fn zip(&self) -> Option<&str> {
        self.contact.zip.as_deref()
    }

    pub fn set_zip<S: Into<String>>(&mut self, zip: impl Into<Option<S>>) {
        self.contact.zip = zip.into().map(Into::into);
    }

    pub fn phone(&self) -> Option<&str> {
        self.contact.phone.as_deref()
    }

    pub fn set_phone<S: Into<String>>(&mut self, phone: impl Into<Option<S>>) {
        self.contact.phone = phone.into().map(Into::into);
    }

    pub fn email(&self) -> Option<&str> {
        self.contact.email.as_deref()
    }

    pub fn set_email<S: Into<String>>(&mut self, email: impl Into<Option<S>>) {
        self.contact.email = email.into().map(Into::into);
    }

    pub fn additional_info(&self) -> Option<&Value> {
        self.additional_info.as_ref()
    }

    pub fn additional_info_mut(&mut self) -> &mut Option<Value> {
        &mut self.additional_info
    }

    /// Replace the metadata container; a JSON `null` clears it.
    pub fn set_additional_info(&mut self, info: impl Into<Option<Value>>) {
        self.additional_info = additional_info::normalize(info.into());
    }

    pub fn external_id(&self) -> Option<CustomerId> {
        self.external_id
    }

    pub fn set_external_id(&mut self, external_id: impl Into<Option<CustomerId>>) {
        self.external_id = external_id.into();
    }

    pub fn version(&self) -> Option<u64> {
        self.version
    }

    pub fn set_version(&mut self, version: u64) {
        self.version = Some(version);
    }

    /// Whether the customer is the tenant's public customer.
    pub fn is_public(&self) -> bool {
        additional_info::bool_flag(self.additional_info.as_ref(), IS_PUBLIC_KEY)
    }

    /// Short reference record; `None` until the customer has an id.
    pub fn to_short_customer_info(&self) -> Option<ShortCustomerInfo> {
        self.id.map(|customer_id| ShortCustomerInfo {
            customer_id,
            title: self.title.clone(),
            is_public: self.is_public(),
        })
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> Option<CustomerId> {
        self.id
    }

    fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    fn created_time(&self) -> Option<i64> {
        self.created_time
    }
}

impl Versioned for Customer {
    fn version(&self) -> Option<u64> {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = Some(version);
    }
}

/// Customers are owned by their tenant.
impl HasOwnerId for Customer {
    fn owner_id(&self) -> Option<EntityId> {
        self.tenant_id.map(EntityId::from)
    }
}

impl Hash for Customer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.title.hash(state);
        self.version.hash(state);
    }
}

impl core::fmt::Display for Customer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fn or_null<T: core::fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map_or_else(|| "null".to_string(), ToString::to_string)
        }

        let c = &self.contact;
        write!(
            f,
            "Customer [title={}, tenantId={}, additionalInfo={}, country={}, state={}, city={}, address={}, address2={}, zip={}, phone={}, email={}, createdTime={}, id={}]",
            or_null(&self.title),
            or_null(&self.tenant_id),
            or_null(&self.additional_info),
            or_null(&c.country),
            or_null(&c.state),
            or_null(&c.city),
            or_null(&c.address),
            or_null(&c.address2),
            or_null(&c.zip),
            or_null(&c.phone),
            or_null(&c.email),
            or_null(&self.created_time),
            or_null(&self.id),
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerOut<'a> {
    id: Option<CustomerId>,
    created_time: Option<i64>,
    tenant_id: Option<TenantId>,
    title: Option<&'a str>,
    name: Option<&'a str>,
    #[serde(flatten)]
    contact: &'a ContactInfo,
    additional_info: Option<&'a Value>,
    external_id: Option<CustomerId>,
    version: Option<u64>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CustomerIn {
    id: Option<CustomerId>,
    created_time: Option<i64>,
    tenant_id: Option<TenantId>,
    title: Option<String>,
    name: Option<String>,
    #[serde(flatten)]
    contact: ContactInfo,
    additional_info: Option<Value>,
    external_id: Option<CustomerId>,
    version: Option<u64>,
}

impl Serialize for Customer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CustomerOut {
            id: self.id,
            created_time: self.created_time,
            tenant_id: self.tenant_id,
            title: self.title(),
            name: self.name(),
            contact: &self.contact,
            additional_info: self.additional_info.as_ref(),
            external_id: self.external_id,
            version: self.version,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Customer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = CustomerIn::deserialize(deserializer)?;
        Ok(Self {
            id: raw.id,
            created_time: raw.created_time,
            tenant_id: raw.tenant_id,
            title: raw.title.or(raw.name),
            contact: raw.contact,
            additional_info: additional_info::normalize(raw.additional_info),
            external_id: raw.external_id,
            version: raw.version,
        })
    }
}
