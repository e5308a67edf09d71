// ABOUTME: Shared domain types for Voxdesk
// ABOUTME: User roles and profiles, subscription plans, and waitlist signups

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Account role, decides which area of the site a user lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "client" => Ok(Role::Client),
            other => Err(ValidationError::InvalidRole(other.to_string())),
        }
    }
}

/// Profile record kept for every account
///
/// `assistant_id` links the account to at most one assistant on the voice
/// platform. It is written once, when the assistant is first created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub assistant_id: Option<String>,
}

impl UserProfile {
    /// Name shown in greetings and used for default assistant names
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Subscription plans offered on the pricing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Entry,
    Starter,
}

impl Plan {
    pub const ALL: [Plan; 2] = [Plan::Entry, Plan::Starter];

    /// Resolve the `?plan=` query value; anything but "entry" is Starter
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "entry" => Plan::Entry,
            _ => Plan::Starter,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Plan::Entry => "entry",
            Plan::Starter => "starter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Entry => "Entry Plan",
            Plan::Starter => "Starter Plan",
        }
    }

    pub fn monthly_price(&self) -> &'static str {
        match self {
            Plan::Entry => "$66 NZD/month",
            Plan::Starter => "$99 NZD/month",
        }
    }
}

/// Business categories offered by the signup form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessType {
    Restaurant,
    #[serde(rename = "Auto Services")]
    AutoServices,
    Retail,
    Healthcare,
    #[serde(rename = "Salon/Beauty")]
    SalonBeauty,
    #[serde(rename = "Professional Services")]
    ProfessionalServices,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Other,
}

impl BusinessType {
    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::Restaurant => "Restaurant",
            BusinessType::AutoServices => "Auto Services",
            BusinessType::Retail => "Retail",
            BusinessType::Healthcare => "Healthcare",
            BusinessType::SalonBeauty => "Salon/Beauty",
            BusinessType::ProfessionalServices => "Professional Services",
            BusinessType::RealEstate => "Real Estate",
            BusinessType::Other => "Other",
        }
    }
}

impl FromStr for BusinessType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let all = [
            BusinessType::Restaurant,
            BusinessType::AutoServices,
            BusinessType::Retail,
            BusinessType::Healthcare,
            BusinessType::SalonBeauty,
            BusinessType::ProfessionalServices,
            BusinessType::RealEstate,
            BusinessType::Other,
        ];
        all.into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidBusinessType(s.to_string()))
    }
}

/// Get Started form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaitlistSignup {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub business_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub calls_per_week: Option<String>,
    #[serde(default)]
    pub best_time_to_call: Option<String>,
    #[serde(default)]
    pub ai_requests: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub agree_terms: bool,
    #[serde(default)]
    pub subscribe_updates: bool,
}

/// Stored waitlist entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub business_name: String,
    pub phone: String,
    pub business_type: Option<String>,
    pub calls_per_week: Option<String>,
    pub best_time_to_call: Option<String>,
    pub ai_requests: Option<String>,
    pub plan: Plan,
    pub subscribe_updates: bool,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_round_trip_through_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Client ".parse::<Role>().unwrap(), Role::Client);
        assert!("owner".parse::<Role>().is_err());
        assert_eq!(Role::Client.to_string(), "client");
    }

    #[test]
    fn test_plan_from_query() {
        assert_eq!(Plan::from_query(Some("entry")), Plan::Entry);
        assert_eq!(Plan::from_query(Some("ENTRY")), Plan::Entry);
        assert_eq!(Plan::from_query(Some("pro")), Plan::Starter);
        assert_eq!(Plan::from_query(None), Plan::Starter);
        assert_eq!(Plan::Entry.monthly_price(), "$66 NZD/month");
        assert_eq!(Plan::Starter.display_name(), "Starter Plan");
    }

    #[test]
    fn test_business_type_labels() {
        assert_eq!(
            "salon/beauty".parse::<BusinessType>().unwrap(),
            BusinessType::SalonBeauty
        );
        assert!("Space Mining".parse::<BusinessType>().is_err());

        let json = serde_json::to_string(&BusinessType::RealEstate).unwrap();
        assert_eq!(json, "\"Real Estate\"");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut profile = UserProfile {
            id: "u1".to_string(),
            email: "owner@pizza.co.nz".to_string(),
            full_name: Some("  ".to_string()),
            role: Role::Client,
            assistant_id: None,
        };
        assert_eq!(profile.display_name(), "owner@pizza.co.nz");

        profile.full_name = Some("Mia Chen".to_string());
        assert_eq!(profile.display_name(), "Mia Chen");
    }
}
