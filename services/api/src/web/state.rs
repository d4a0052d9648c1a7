//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.
//!
//! Every core container sits behind its own mutex, so mutations are serialized
//! per container. Handlers never hold a lock across a call to an external port.

use crate::config::Config;
use crate::error::ApiError;
use fridge_core::{
    budget::BudgetTracker, meal_plan::MealPlan, shopping::ShoppingList, Clock, InventoryStore,
    Preferences, ProductCatalog, RecipeService, SpeechToTextService, TextToSpeechService,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

//=========================================================================================
// Injected Services
//=========================================================================================

/// The external collaborators, constructed once at startup and injected into `AppState`.
#[derive(Clone)]
pub struct Services {
    pub clock: Arc<dyn Clock>,
    pub catalog: Arc<ProductCatalog>,
    /// `None` when no recipe API key is configured.
    pub recipes: Option<Arc<dyn RecipeService>>,
    pub stt_adapter: Option<Arc<dyn SpeechToTextService>>,
    pub tts_adapter: Option<Arc<dyn TextToSpeechService>>,
}

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub config: Arc<Config>,
    pub services: Services,
    pub inventory: Mutex<InventoryStore>,
    pub shopping: Mutex<ShoppingList>,
    pub meal_plan: Mutex<MealPlan>,
    pub budget: Mutex<BudgetTracker>,
    pub preferences: Mutex<Preferences>,
}

impl AppState {
    pub fn new(config: Arc<Config>, services: Services) -> Self {
        let inventory = if config.seed_demo_data {
            info!("Seeding inventory with demo items.");
            InventoryStore::with_sample_items(services.clock.today())
        } else {
            InventoryStore::new()
        };

        Self {
            config,
            services,
            inventory: Mutex::new(inventory),
            shopping: Mutex::new(ShoppingList::new()),
            meal_plan: Mutex::new(MealPlan::new()),
            budget: Mutex::new(BudgetTracker::new()),
            preferences: Mutex::new(Preferences::default()),
        }
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.services.clock.today()
    }

    pub fn recipe_service(&self) -> Result<Arc<dyn RecipeService>, ApiError> {
        self.services
            .recipes
            .clone()
            .ok_or_else(|| ApiError::Disabled("recipe suggestions need SPOONACULAR_API_KEY".to_string()))
    }

    pub fn stt_adapter(&self) -> Result<Arc<dyn SpeechToTextService>, ApiError> {
        self.services
            .stt_adapter
            .clone()
            .ok_or_else(|| ApiError::Disabled("voice audio needs OPENAI_API_KEY".to_string()))
    }

    pub fn tts_adapter(&self) -> Result<Arc<dyn TextToSpeechService>, ApiError> {
        self.services
            .tts_adapter
            .clone()
            .ok_or_else(|| ApiError::Disabled("spoken replies need OPENAI_API_KEY".to_string()))
    }
}
