//! Rewards service
//!
//! The request boundary of the engine. Wires the four shared collections
//! into the component views (registry, catalog, directory, ledger,
//! verifier) and exposes every external operation: registration, login,
//! bin verification, disposal settlement, product listing, wallet query,
//! and the admin CRUD surface for products and bins.
//!
//! All failures surface as [`RewardsError`] and classify into an
//! HTTP-style status via [`RewardsError::status_code`]; callers hosting a
//! transport turn them into structured error responses.

use crate::core::catalog::{ProductCatalog, ProductFilter};
use crate::core::directory::UserDirectory;
use crate::core::ledger::{WalletLedger, DEFAULT_HISTORY_LIMIT};
use crate::core::registry::BinRegistry;
use crate::core::verifier::{DisposalVerifier, SettlementReceipt, VerifiedBin};
use crate::store::{EntityStore, MemoryStore};
use crate::types::{
    Bin, BinInput, BinPatch, Product, ProductInput, ProductPatch, RecordId, RewardsError,
    Transaction, User, UserInput, UserProfile,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

/// Discriminator for the admin resource surface
///
/// Admin requests name the resource they operate on; anything other than
/// `product` or `bin` is a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Product,
    Bin,
}

impl FromStr for ResourceKind {
    type Err = RewardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(ResourceKind::Product),
            "bin" => Ok(ResourceKind::Bin),
            other => Err(RewardsError::invalid_resource_kind(other)),
        }
    }
}

/// Admin listing of one resource kind
#[derive(Debug, Clone)]
pub enum AdminListing {
    Products(Vec<Product>),
    Bins(Vec<Bin>),
}

/// Wallet query result: balance plus recent history
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WalletStatement {
    pub wallet_balance: Decimal,
    /// Most-recent-first, truncated to the default history limit
    pub transactions: Vec<Transaction>,
}

/// One row of the final wallet report produced for CSV output
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSummary {
    pub user_id: RecordId,
    pub email: String,
    pub balance: Decimal,
    /// Completed reward entries recorded for this user
    pub rewards: usize,
}

/// The assembled rewards engine
///
/// Owns the four collections and hands out cloneable component views that
/// share them. Cloning the service is cheap and all clones observe the
/// same state.
#[derive(Debug, Clone)]
pub struct RewardsService {
    users: Arc<MemoryStore<User>>,
    products: Arc<MemoryStore<Product>>,
    bins: Arc<MemoryStore<Bin>>,
    transactions: Arc<MemoryStore<Transaction>>,
    registry: BinRegistry,
    catalog: ProductCatalog,
    directory: UserDirectory,
    ledger: WalletLedger,
    verifier: DisposalVerifier,
}

impl RewardsService {
    /// Create a service over empty collections
    pub fn new() -> Self {
        let users = Arc::new(MemoryStore::<User>::new());
        let products = Arc::new(MemoryStore::<Product>::new());
        let bins = Arc::new(MemoryStore::<Bin>::new());
        let transactions = Arc::new(MemoryStore::<Transaction>::new());

        let registry = BinRegistry::new(Arc::clone(&bins));
        let catalog = ProductCatalog::new(Arc::clone(&products));
        let directory = UserDirectory::new(Arc::clone(&users));
        let ledger = WalletLedger::new(Arc::clone(&transactions), Arc::clone(&users));
        let verifier = DisposalVerifier::new(
            registry.clone(),
            catalog.clone(),
            directory.clone(),
            ledger.clone(),
        );

        RewardsService {
            users,
            products,
            bins,
            transactions,
            registry,
            catalog,
            directory,
            ledger,
            verifier,
        }
    }

    /// Create a service pre-populated with the demo dataset
    ///
    /// Seeds the catalog, bins, users (demo + admin), and one historical
    /// reward entry with stable identities, so scan event files can
    /// reference them across runs.
    pub fn with_demo_data() -> Self {
        let service = Self::new();
        let seeded = crate::seed::demo_dataset();
        for product in seeded.products {
            service.products.insert_seeded(product);
        }
        for bin in seeded.bins {
            service.bins.insert_seeded(bin);
        }
        for user in seeded.users {
            service.users.insert_seeded(user);
        }
        for transaction in seeded.transactions {
            service.transactions.insert_seeded(transaction);
        }
        service
    }

    /// The scan-cycle orchestrator
    pub fn verifier(&self) -> &DisposalVerifier {
        &self.verifier
    }

    /// Register a new account, returning its identity
    pub fn register_user(&self, input: UserInput) -> Result<RecordId, RewardsError> {
        Ok(self.directory.register(input)?.id)
    }

    /// Check credentials and return the account's public profile
    pub fn login(&self, email: &str, password: &str) -> Result<UserProfile, RewardsError> {
        self.directory.login(email, password)
    }

    /// Verify a scanned bin identifier (read-only)
    pub fn verify_bin(&self, bin_id: &str) -> Result<VerifiedBin, RewardsError> {
        self.verifier.verify(bin_id)
    }

    /// Settle a disposal and credit the reward
    pub fn settle_disposal(
        &self,
        bin_id: &str,
        product_id: &RecordId,
        user_id: &RecordId,
    ) -> Result<SettlementReceipt, RewardsError> {
        self.verifier.settle(bin_id, product_id, user_id)
    }

    /// Products matching the filter, newest-first
    pub fn list_products(&self, filter: ProductFilter) -> Vec<Product> {
        self.catalog.list(filter)
    }

    /// Balance plus the most recent transactions for a user
    pub fn wallet(&self, user_id: &RecordId) -> Result<WalletStatement, RewardsError> {
        let user = self
            .directory
            .get(user_id)
            .ok_or_else(|| RewardsError::user_not_found(*user_id))?;

        Ok(WalletStatement {
            wallet_balance: user.wallet_balance,
            transactions: self.ledger.history(user_id, DEFAULT_HISTORY_LIMIT),
        })
    }

    /// Admin listing for one resource kind
    pub fn admin_list(&self, kind: ResourceKind) -> AdminListing {
        match kind {
            ResourceKind::Product => {
                AdminListing::Products(self.catalog.list(ProductFilter::default()))
            }
            ResourceKind::Bin => AdminListing::Bins(self.registry.list()),
        }
    }

    /// Create a catalog product (admin)
    pub fn create_product(&self, input: ProductInput) -> Product {
        self.catalog.create(input)
    }

    /// Patch a product (admin); silent no-op when the id is absent
    pub fn update_product(
        &self,
        id: &RecordId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RewardsError> {
        self.catalog.update(id, patch)
    }

    /// Delete a product (admin), reporting whether it was present
    pub fn delete_product(&self, id: &RecordId) -> bool {
        self.catalog.remove(id)
    }

    /// Register a bin (admin); the result carries the generated external
    /// identifier and QR payload
    pub fn register_bin(&self, input: BinInput) -> Bin {
        self.registry.register(input)
    }

    /// Patch a bin (admin); silent no-op when the id is absent
    pub fn update_bin(&self, id: &RecordId, patch: BinPatch) -> Result<Option<Bin>, RewardsError> {
        self.registry.update(id, patch)
    }

    /// Delete a bin (admin), reporting whether it was present
    pub fn delete_bin(&self, id: &RecordId) -> bool {
        self.registry.remove(id)
    }

    /// All bins, newest-first (admin)
    pub fn list_bins(&self) -> Vec<Bin> {
        self.registry.list()
    }

    /// Final wallet report over every account
    ///
    /// One row per user with the cached balance and the number of
    /// completed reward entries; ordering is left to the writer.
    pub fn wallet_summaries(&self) -> Vec<WalletSummary> {
        self.users
            .filter(|_| true)
            .into_iter()
            .map(|user| WalletSummary {
                rewards: self.ledger.reward_count(&user.id),
                user_id: user.id,
                email: user.email,
                balance: user.wallet_balance,
            })
            .collect()
    }
}

impl Default for RewardsService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::types::{Category, RecyclableType};
    use rstest::rstest;

    #[rstest]
    #[case("product", Ok(ResourceKind::Product))]
    #[case("bin", Ok(ResourceKind::Bin))]
    #[case("warehouse", Err(RewardsError::invalid_resource_kind("warehouse")))]
    #[case("", Err(RewardsError::invalid_resource_kind("")))]
    #[case("Product", Err(RewardsError::invalid_resource_kind("Product")))]
    fn test_resource_kind_parsing(
        #[case] input: &str,
        #[case] expected: Result<ResourceKind, RewardsError>,
    ) {
        assert_eq!(input.parse::<ResourceKind>(), expected);
    }

    #[test]
    fn test_demo_service_settles_the_reference_scenario() {
        let service = RewardsService::with_demo_data();

        let receipt = service
            .settle_disposal("BIN-DEL-001", &seed::DEMO_PRODUCT_ID, &seed::DEMO_USER_ID)
            .unwrap();

        assert_eq!(receipt.reward, Decimal::new(5, 0));
        assert_eq!(receipt.bin_location, "Central Park, Delhi");
        assert_eq!(receipt.product_name, "Eco Fresh Drink");

        let statement = service.wallet(&seed::DEMO_USER_ID).unwrap();
        assert_eq!(statement.wallet_balance, Decimal::new(40, 0));
        // Seeded historical entry plus the new one, newest first
        assert_eq!(statement.transactions.len(), 2);
        assert_eq!(statement.transactions[0].amount, Decimal::new(5, 0));
    }

    #[test]
    fn test_demo_glass_product_is_rejected_by_delhi_bin() {
        let service = RewardsService::with_demo_data();

        let result = service.settle_disposal(
            "BIN-DEL-001",
            &seed::DEMO_GLASS_PRODUCT_ID,
            &seed::DEMO_USER_ID,
        );

        assert_eq!(
            result,
            Err(RewardsError::material_mismatch(
                RecyclableType::Glass,
                vec![RecyclableType::Plastic, RecyclableType::Paper]
            ))
        );
        assert_eq!(
            service.wallet(&seed::DEMO_USER_ID).unwrap().wallet_balance,
            Decimal::new(35, 0)
        );
    }

    #[test]
    fn test_register_then_login_round_trip() {
        let service = RewardsService::new();

        let user_id = service
            .register_user(UserInput {
                email: "new.user@example.com".to_string(),
                password: "hunter2!".to_string(),
                name: "New User".to_string(),
                phone: None,
            })
            .unwrap();

        let profile = service.login("new.user@example.com", "hunter2!").unwrap();
        assert_eq!(profile.id, user_id);
        assert_eq!(profile.wallet_balance, Decimal::ZERO);
    }

    #[test]
    fn test_admin_listing_by_kind() {
        let service = RewardsService::with_demo_data();

        match service.admin_list(ResourceKind::Product) {
            AdminListing::Products(products) => assert_eq!(products.len(), 4),
            AdminListing::Bins(_) => panic!("expected products"),
        }

        match service.admin_list(ResourceKind::Bin) {
            AdminListing::Bins(bins) => assert_eq!(bins.len(), 4),
            AdminListing::Products(_) => panic!("expected bins"),
        }
    }

    #[test]
    fn test_admin_product_crud() {
        let service = RewardsService::new();

        let product = service.create_product(ProductInput {
            name: "Boxed Water".to_string(),
            description: "Water in a paper carton".to_string(),
            price: Decimal::new(60, 0),
            reward_amount: Decimal::new(3, 0),
            category: Category::Beverage,
            recyclable_type: RecyclableType::Paper,
            image_url: None,
        });
        assert_eq!(product.reward_percentage, Decimal::new(500, 2));

        let updated = service
            .update_product(
                &product.id,
                ProductPatch {
                    name: Some("Boxed Water 1L".to_string()),
                    ..ProductPatch::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Boxed Water 1L");

        assert!(service.delete_product(&product.id));
        assert!(service.list_products(ProductFilter::default()).is_empty());
    }

    #[test]
    fn test_admin_bin_crud_includes_generated_identifier() {
        let service = RewardsService::new();

        let bin = service.register_bin(BinInput {
            location: crate::types::BinLocation {
                name: "Test Hub".to_string(),
                address: "1 Test Street".to_string(),
                coordinates: None,
            },
            accepted_types: vec![RecyclableType::Metal],
        });

        assert!(bin.bin_id.starts_with("BIN-"));
        assert!(bin.qr_code.starts_with("data:image/svg+xml;base64,"));
        assert_eq!(service.list_bins().len(), 1);

        assert!(service.delete_bin(&bin.id));
        assert!(service.list_bins().is_empty());
    }

    #[test]
    fn test_wallet_for_unknown_user_is_not_found() {
        let service = RewardsService::new();
        let ghost = RecordId::new_v4();

        assert_eq!(
            service.wallet(&ghost),
            Err(RewardsError::user_not_found(ghost))
        );
    }

    #[test]
    fn test_wallet_summaries_cover_all_accounts() {
        let service = RewardsService::with_demo_data();
        service
            .settle_disposal("BIN-DEL-001", &seed::DEMO_PRODUCT_ID, &seed::DEMO_USER_ID)
            .unwrap();

        let mut summaries = service.wallet_summaries();
        summaries.sort_by(|a, b| a.email.cmp(&b.email));

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].email, "admin@ecorewards.app");
        assert_eq!(summaries[0].balance, Decimal::ZERO);
        assert_eq!(summaries[0].rewards, 0);
        assert_eq!(summaries[1].email, "eco.user@example.com");
        assert_eq!(summaries[1].balance, Decimal::new(40, 0));
        assert_eq!(summaries[1].rewards, 2);
    }
}
