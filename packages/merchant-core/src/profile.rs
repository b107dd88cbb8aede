//! Merchant profile: business details, settlement banks, verification tiers

use std::sync::Arc;

use proof_client::{BankAccount, MerchantProfile, ProfileUpdate};
use tracing::{info, warn};

use crate::busy::BusyFlag;
use crate::notice::{DisplayError, Notice, Submission};
use crate::traits::BaseProfileApi;

pub const BUSINESS_CATEGORIES: [&str; 4] = [
    "Transport & Logistics",
    "Retail & Trade",
    "Food & Services",
    "Other",
];

pub const BANKS: [&str; 7] = [
    "Access Bank",
    "First Bank",
    "GTBank",
    "UBA",
    "Zenith Bank",
    "Kuda Bank",
    "Moniepoint",
];

pub const SETTLEMENT_CYCLES: [&str; 2] = ["T+1 (Daily)", "T+7 (Weekly)"];

const DEFAULT_CATEGORY: &str = "Transport & Logistics";
const DEFAULT_SETTLEMENT_CYCLE: &str = "T+1 (Daily)";

/// Business details form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessForm {
    pub category: String,
    pub cac_number: String,
    pub address: String,
    pub bvn: String,
}

impl Default for BusinessForm {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            cac_number: String::new(),
            address: String::new(),
            bvn: String::new(),
        }
    }
}

impl BusinessForm {
    /// Form synced from the loaded profile; missing values become defaults
    pub fn from_profile(profile: &MerchantProfile) -> Self {
        let or_blank = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            category: profile
                .business_category
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            cac_number: or_blank(&profile.cac_number),
            address: or_blank(&profile.address),
            bvn: or_blank(&profile.bvn),
        }
    }

    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            address: self.address.clone(),
            bvn: self.bvn.clone(),
            business_category: self.category.clone(),
            cac_number: self.cac_number.clone(),
        }
    }
}

/// Link-a-bank form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankForm {
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    pub settlement_cycle: String,
}

impl Default for BankForm {
    fn default() -> Self {
        Self {
            bank_name: String::new(),
            account_number: String::new(),
            account_name: String::new(),
            settlement_cycle: DEFAULT_SETTLEMENT_CYCLE.to_string(),
        }
    }
}

impl BankForm {
    pub fn is_complete(&self) -> bool {
        [&self.bank_name, &self.account_number, &self.account_name]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    pub fn to_account(&self) -> BankAccount {
        BankAccount {
            bank_name: self.bank_name.trim().to_string(),
            account_number: self.account_number.trim().to_string(),
            account_name: self.account_name.trim().to_string(),
            settlement_cycle: self.settlement_cycle.clone(),
        }
    }
}

// =============================================================================
// Verification tiers
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VerificationTier {
    Tier1,
    Tier2,
    Tier3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierStatus {
    Verified,
    Pending,
    Locked,
}

impl TierStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TierStatus::Verified => "Verified",
            TierStatus::Pending => "Pending",
            TierStatus::Locked => "Locked",
        }
    }
}

impl VerificationTier {
    pub const ALL: [VerificationTier; 3] = [
        VerificationTier::Tier1,
        VerificationTier::Tier2,
        VerificationTier::Tier3,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VerificationTier::Tier1 => "Tier 1",
            VerificationTier::Tier2 => "Tier 2",
            VerificationTier::Tier3 => "Tier 3",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            VerificationTier::Tier1 => "Basic identification and phone verification.",
            VerificationTier::Tier2 => "BVN and address verification for higher limits.",
            VerificationTier::Tier3 => "Full business documentation for enterprise features.",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    fn rank(tier: Option<Self>) -> i8 {
        tier.map_or(-1, |t| t as i8)
    }

    /// Status relative to the merchant's level (missing level means Tier 1).
    ///
    /// Reached tiers are verified, the next one is pending, the rest locked.
    /// An unrecognised level counts as no tier reached.
    pub fn status(&self, verification_level: Option<&str>) -> TierStatus {
        let current = Self::rank(Self::current(verification_level));
        let target = *self as i8;

        if target <= current {
            TierStatus::Verified
        } else if target == current + 1 {
            TierStatus::Pending
        } else {
            TierStatus::Locked
        }
    }

    pub fn is_current(&self, verification_level: Option<&str>) -> bool {
        Self::current(verification_level) == Some(*self)
    }

    fn current(verification_level: Option<&str>) -> Option<Self> {
        match verification_level {
            None | Some("") => Some(VerificationTier::Tier1),
            Some(level) => Self::parse(level),
        }
    }
}

// =============================================================================
// Service
// =============================================================================

const LOAD_FAILED: &str = "Could not load profile data";
const UPDATE_OK: &str = "Business details updated successfully!";
const UPDATE_FAILED: &str = "Failed to update business details";
const LINK_OK: &str = "Bank account linked successfully!";
const LINK_FAILED: &str = "Failed to link bank account";

/// Profile page actions. Business and bank forms share one submitting flag.
pub struct ProfileService {
    api: Arc<dyn BaseProfileApi>,
    busy: BusyFlag,
}

impl ProfileService {
    pub fn new(api: Arc<dyn BaseProfileApi>) -> Self {
        Self {
            api,
            busy: BusyFlag::new(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.busy.is_busy()
    }

    pub async fn load(&self) -> Result<MerchantProfile, DisplayError> {
        self.api.get_profile().await.map_err(|e| {
            warn!("Failed to load profile: {}", e);
            DisplayError::from(LOAD_FAILED)
        })
    }

    pub async fn update_business(&self, form: &BusinessForm) -> Submission {
        let Some(_guard) = self.busy.try_begin() else {
            return Submission::Busy;
        };

        match self.api.update_profile(&form.to_update()).await {
            Ok(()) => {
                info!(category = %form.category, "Business details updated");
                Submission::Settled(Some(Notice::success(UPDATE_OK)))
            }
            Err(e) => {
                warn!("Profile update failed: {}", e);
                Submission::Settled(Some(Notice::Error(e.user_message(UPDATE_FAILED))))
            }
        }
    }

    /// Link a settlement account. On success the caller resets the form.
    pub async fn link_bank(&self, form: &BankForm) -> Submission {
        let Some(_guard) = self.busy.try_begin() else {
            return Submission::Busy;
        };

        if !form.is_complete() {
            return Submission::Rejected("Please fill in all bank details".to_string());
        }

        match self.api.add_bank(&form.to_account()).await {
            Ok(()) => {
                info!(bank = %form.bank_name, "Settlement account linked");
                Submission::Settled(Some(Notice::success(LINK_OK)))
            }
            Err(e) => {
                warn!("Linking bank failed: {}", e);
                Submission::Settled(Some(Notice::Error(e.user_message(LINK_FAILED))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{rejected, rejected_without_message, MockProfileApi, ProfileCall};

    #[test]
    fn business_form_syncs_from_profile() {
        let profile = MerchantProfile {
            business_category: Some("Retail & Trade".to_string()),
            address: Some("12 Marina, Lagos".to_string()),
            ..Default::default()
        };
        let form = BusinessForm::from_profile(&profile);
        assert_eq!(form.category, "Retail & Trade");
        assert_eq!(form.address, "12 Marina, Lagos");
        assert_eq!(form.bvn, "");

        let form = BusinessForm::from_profile(&MerchantProfile::default());
        assert_eq!(form, BusinessForm::default());
        assert_eq!(form.to_update().business_category, "Transport & Logistics");
    }

    #[test]
    fn tiers_relative_to_level() {
        use TierStatus::*;
        use VerificationTier::*;

        let statuses = |level: Option<&str>| VerificationTier::ALL.map(|t| t.status(level));

        assert_eq!(statuses(None), [Verified, Pending, Locked]);
        assert_eq!(statuses(Some("Tier 2")), [Verified, Verified, Pending]);
        assert_eq!(statuses(Some("Tier 3")), [Verified, Verified, Verified]);
        assert_eq!(statuses(Some("Gold")), [Pending, Locked, Locked]);

        assert!(Tier1.is_current(None));
        assert!(Tier2.is_current(Some("Tier 2")));
        assert!(!Tier1.is_current(Some("Tier 2")));
    }

    #[test]
    fn bank_form_defaults_to_daily_settlement() {
        let form = BankForm::default();
        assert_eq!(form.settlement_cycle, "T+1 (Daily)");
        assert!(!form.is_complete());
    }

    #[tokio::test]
    async fn update_sends_snake_case_update() {
        let api = Arc::new(MockProfileApi::new());
        let service = ProfileService::new(api.clone());
        let form = BusinessForm {
            cac_number: "RC123456".to_string(),
            ..Default::default()
        };

        let result = service.update_business(&form).await;

        assert_eq!(result, Submission::Settled(Some(Notice::success(UPDATE_OK))));
        assert_eq!(api.calls(), vec![ProfileCall::UpdateProfile(form.to_update())]);
    }

    #[tokio::test]
    async fn failures_show_server_reason_or_fallback() {
        let api = Arc::new(
            MockProfileApi::new()
                .with_update_error(rejected(400, "Invalid BVN"))
                .with_add_bank_error(rejected_without_message(500))
                .with_profile_error(rejected(401, "Unauthorized")),
        );
        let service = ProfileService::new(api);

        assert_eq!(
            service.update_business(&BusinessForm::default()).await,
            Submission::Settled(Some(Notice::error("Invalid BVN")))
        );

        let bank = BankForm {
            bank_name: "GTBank".to_string(),
            account_number: "0123456789".to_string(),
            account_name: "Acme Ltd".to_string(),
            ..Default::default()
        };
        assert_eq!(
            service.link_bank(&bank).await,
            Submission::Settled(Some(Notice::error(LINK_FAILED)))
        );

        assert_eq!(service.load().await.unwrap_err().to_string(), LOAD_FAILED);
    }

    #[tokio::test]
    async fn incomplete_bank_form_sends_nothing() {
        let api = Arc::new(MockProfileApi::new());
        let service = ProfileService::new(api.clone());

        let result = service.link_bank(&BankForm::default()).await;

        assert!(matches!(result, Submission::Rejected(_)));
        assert!(api.calls().is_empty());
    }
}
