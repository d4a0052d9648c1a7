//! services/api/src/web/dto.rs
//!
//! Request and response payloads for the REST API. These carry the OpenAPI
//! schema annotations and map to and from the core domain types.

use chrono::NaiveDate;
use fridge_core::{
    Category, Expense, ExpiryStatus, InventoryItem, MealPlanEntry, MealSlot, Preferences,
    ProductGuess, RecipeSummary, ShoppingItem, SortOption, VoiceCommand,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

fn default_quantity() -> u32 {
    1
}

//=========================================================================================
// Inventory
//=========================================================================================

/// An inventory item together with its derived expiry fields.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String, example = "dairy")]
    pub category: Category,
    pub expiration_date: NaiveDate,
    pub quantity: u32,
    pub days_until_expiry: i64,
    #[schema(value_type = String, example = "warning")]
    pub status: ExpiryStatus,
}

impl InventoryItemResponse {
    pub fn from_domain(item: InventoryItem, today: NaiveDate) -> Self {
        Self {
            days_until_expiry: item.days_until_expiry(today),
            status: item.status(today),
            id: item.id,
            name: item.name,
            category: item.category,
            expiration_date: item.expiration_date,
            quantity: item.quantity,
        }
    }

    pub fn list(items: Vec<InventoryItem>, today: NaiveDate) -> Vec<Self> {
        items
            .into_iter()
            .map(|item| Self::from_domain(item, today))
            .collect()
    }
}

/// Payload for creating or replacing an inventory item.
#[derive(Debug, Deserialize, ToSchema)]
pub struct InventoryItemRequest {
    pub name: String,
    #[schema(value_type = String, example = "vegetable")]
    pub category: Category,
    pub expiration_date: NaiveDate,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// One of `name_asc`, `name_desc`, `expiry_asc`, `expiry_desc`, `category`.
    #[param(value_type = Option<String>)]
    pub sort: Option<SortOption>,
    /// Case-insensitive name filter.
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpiryAlertsResponse {
    pub alert_days: u32,
    pub expired: Vec<InventoryItemResponse>,
    pub expiring: Vec<InventoryItemResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemovedCountResponse {
    pub removed: usize,
}

//=========================================================================================
// Scanning
//=========================================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct BarcodeScanRequest {
    pub barcode: String,
    /// When true, the guess is immediately added to the inventory.
    #[serde(default)]
    pub add_to_inventory: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductGuessResponse {
    pub name: String,
    #[schema(value_type = String)]
    pub category: Category,
    pub shelf_life_days: u32,
}

impl From<ProductGuess> for ProductGuessResponse {
    fn from(guess: ProductGuess) -> Self {
        Self {
            name: guess.name,
            category: guess.category,
            shelf_life_days: guess.shelf_life_days,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BarcodeScanResponse {
    pub guess: Option<ProductGuessResponse>,
    pub added: Option<InventoryItemResponse>,
}

/// Recognized text lines from one captured label image.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExpiryScanRequest {
    pub lines: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpiryScanResponse {
    /// `MM/YY`, or absent when no valid date was found.
    pub token: Option<String>,
    /// Last day of the token's month.
    pub expiration_date: Option<NaiveDate>,
    pub message: String,
}

//=========================================================================================
// Recipes
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeDto {
    pub id: i64,
    pub title: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub used_ingredients: Vec<String>,
    #[serde(default)]
    pub missing_ingredients: Vec<String>,
}

impl From<RecipeSummary> for RecipeDto {
    fn from(recipe: RecipeSummary) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            image_url: recipe.image_url,
            used_ingredients: recipe.used_ingredients,
            missing_ingredients: recipe.missing_ingredients,
        }
    }
}

impl From<RecipeDto> for RecipeSummary {
    fn from(dto: RecipeDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            image_url: dto.image_url,
            used_ingredients: dto.used_ingredients,
            missing_ingredients: dto.missing_ingredients,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecipeSearchRequest {
    pub ingredients: Vec<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipeListResponse {
    pub ingredients: Vec<String>,
    pub recipes: Vec<RecipeDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddedCountResponse {
    pub added: usize,
}

//=========================================================================================
// Shopping list
//=========================================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct ShoppingItemRequest {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[schema(value_type = Option<String>)]
    pub category: Option<Category>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShoppingItemResponse {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    #[schema(value_type = Option<String>)]
    pub category: Option<Category>,
    pub checked: bool,
}

impl From<ShoppingItem> for ShoppingItemResponse {
    fn from(item: ShoppingItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            category: item.category,
            checked: item.checked,
        }
    }
}

//=========================================================================================
// Meal plan
//=========================================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct MealPlanRequest {
    pub date: NaiveDate,
    #[schema(value_type = String, example = "dinner")]
    pub slot: MealSlot,
    pub title: String,
    pub recipe_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MealPlanEntryResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub slot: MealSlot,
    pub title: String,
    pub recipe_id: Option<i64>,
}

impl From<MealPlanEntry> for MealPlanEntryResponse {
    fn from(entry: MealPlanEntry) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            slot: entry.slot,
            title: entry.title,
            recipe_id: entry.recipe_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MealPlanQuery {
    /// First day of the seven-day window. Defaults to today.
    pub start: Option<NaiveDate>,
}

//=========================================================================================
// Budget
//=========================================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExpenseRequest {
    pub description: String,
    pub amount_cents: i64,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub category: Option<Category>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    pub date: NaiveDate,
    #[schema(value_type = Option<String>)]
    pub category: Option<Category>,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            description: expense.description,
            amount_cents: expense.amount_cents,
            date: expense.date,
            category: expense.category,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategorySpend {
    #[schema(value_type = Option<String>)]
    pub category: Option<Category>,
    pub amount_cents: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BudgetSummaryResponse {
    pub year: i32,
    pub month: u32,
    pub spent_cents: i64,
    pub limit_cents: Option<i64>,
    /// Negative when over budget. Absent when no monthly budget is set.
    pub remaining_cents: Option<i64>,
    pub by_category: Vec<CategorySpend>,
}

//=========================================================================================
// Preferences
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreferencesDto {
    pub household_size: u32,
    pub expiry_alert_days: u32,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    pub monthly_budget_cents: Option<i64>,
}

impl From<Preferences> for PreferencesDto {
    fn from(prefs: Preferences) -> Self {
        Self {
            household_size: prefs.household_size,
            expiry_alert_days: prefs.expiry_alert_days,
            dietary_restrictions: prefs.dietary_restrictions,
            monthly_budget_cents: prefs.monthly_budget_cents,
        }
    }
}

impl From<PreferencesDto> for Preferences {
    fn from(dto: PreferencesDto) -> Self {
        Self {
            household_size: dto.household_size,
            expiry_alert_days: dto.expiry_alert_days,
            dietary_restrictions: dto.dietary_restrictions,
            monthly_budget_cents: dto.monthly_budget_cents,
        }
    }
}

//=========================================================================================
// Voice
//=========================================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct VoiceCommandRequest {
    pub transcript: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VoiceCommandResponse {
    pub transcript: String,
    #[schema(value_type = Object)]
    pub command: VoiceCommand,
    /// What the app says back.
    pub reply: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SpeakRequest {
    pub text: String,
}

//=========================================================================================
// Health
//=========================================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub today: NaiveDate,
    pub recipes_enabled: bool,
    pub voice_audio_enabled: bool,
}
