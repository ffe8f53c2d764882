//! Types related to application monetization.

use chrono::{DateTime, Utc};
use crate::serde::*;
use crate::types::*;

/// How an entitlement was granted.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum EntitlementType {
    Purchase = 1,
    PremiumSubscription = 2,
    DeveloperGift = 3,
    TestModePurchase = 4,
    FreePurchase = 5,
    UserGift = 6,
    PremiumPurchase = 7,
    ApplicationSubscription = 8,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// Access to a premium offering of an application.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct Entitlement {
    pub id: EntitlementId,
    pub sku_id: SkuId,
    pub application_id: ApplicationId,
    pub user_id: Option<UserId>,
    pub guild_id: Option<GuildId>,
    #[serde(rename = "type")]
    pub kind: EntitlementType,
    #[serde(default)]
    pub deleted: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub consumed: Option<bool>,
}
into_id!(Entitlement, EntitlementId, id);
impl Entitlement {
    /// Returns `true` if this entitlement grants access at the given time.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.deleted &&
            self.starts_at.map_or(true, |x| x <= now) &&
            self.ends_at.map_or(true, |x| now < x)
    }
}
