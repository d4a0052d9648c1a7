pub mod budget;
pub mod domain;
pub mod error;
pub mod expiry;
pub mod inventory;
pub mod meal_plan;
pub mod ports;
pub mod preferences;
pub mod products;
pub mod shopping;
pub mod voice;

pub use domain::{
    Category, Expense, ExpiryStatus, InventoryItem, MealPlanEntry, MealSlot, Preferences,
    ProductGuess, RecipeSummary, ShoppingItem,
};
pub use error::{ValidationError, ValidationResult};
pub use expiry::DateToken;
pub use inventory::{InventoryStore, SortOption};
pub use ports::{
    Clock, FixedClock, PortError, PortResult, RecipeService, SpeechToTextService, SystemClock,
    TextToSpeechService,
};
pub use products::{NoFallback, ProductCatalog, RandomFallback, ShelfLifeFallback};
pub use voice::VoiceCommand;
