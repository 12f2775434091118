//! ABCD MCP Server Implementation
//!
//! Exposes the classification engine as MCP tools. Every call takes a fresh
//! reference snapshot, so a reload never affects a call already running.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::Nutrition;
use crate::reference::ReferenceStore;
use crate::tools::assessment::{self, AthleteInput};
use crate::tools::classification;
use crate::tools::foods;
use crate::tools::reference;
use crate::tools::status::StatusTracker;

/// ABCD MCP Service
#[derive(Clone)]
pub struct AbcdService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    store: Arc<ReferenceStore>,
    tool_router: ToolRouter<AbcdService>,
}

impl AbcdService {
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            store,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Classification Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassifyMeasurementParams {
    /// Metric name: bmi, body_fat, hemoglobina, ferritina, hierro, vitamina_d,
    /// glucosa, hematocrito, calories_per_kg, protein_per_kg, carb_percent,
    /// fat_percent, talla, peso
    pub metric: String,
    pub value: f64,
    pub age: u32,
    /// male or female
    pub gender: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EstimatePercentileParams {
    /// height (cm) or weight (kg)
    pub metric: String,
    pub value: f64,
    pub age: u32,
    pub gender: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MetricStatusParam {
    pub metric: String,
    /// deficient, low, normal, warning, high, excess or unavailable
    pub status: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AggregateStatusParams {
    pub results: Vec<MetricStatusParam>,
}

// ============================================================================
// Assessment Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeriveSportTargetsParams {
    pub weight_kg: f64,
    /// Base caloric need in kcal/day
    pub base_calories: f64,
    /// Sport key; omitted means the default sport
    pub sport: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AssessAthleteParams {
    pub id: String,
    pub name: Option<String>,
    pub age: u32,
    pub gender: String,
    pub sport: Option<String>,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub body_fat_percent: Option<f64>,
    /// Analyte name to value, e.g. {"hemoglobina": 13.2}
    #[serde(default)]
    pub biochemistry: HashMap<String, f64>,
    /// Average daily intake; when energy_kcal is omitted no dietary
    /// classification is done
    pub energy_kcal: Option<f64>,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub lipids_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
    pub base_calories: Option<f64>,
    pub clinical_notes: Option<String>,
}

impl From<AssessAthleteParams> for AthleteInput {
    fn from(p: AssessAthleteParams) -> Self {
        let intake = p.energy_kcal.map(|energy_kcal| Nutrition {
            energy_kcal,
            protein_g: p.protein_g,
            lipids_g: p.lipids_g,
            carbs_g: p.carbs_g,
            fiber_g: p.fiber_g,
        });
        Self {
            id: p.id,
            name: p.name,
            age: p.age,
            gender: p.gender,
            sport: p.sport,
            weight_kg: p.weight_kg,
            height_cm: p.height_cm,
            body_fat_percent: p.body_fat_percent,
            biochemistry: p.biochemistry,
            intake,
            base_calories: p.base_calories,
            clinical_notes: p.clinical_notes,
        }
    }
}

// ============================================================================
// Reference and Food Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetReferenceBandParams {
    pub age: u32,
    pub gender: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReloadReferenceParams {
    /// JSON reference file; omitted reloads the current source
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NormalizeFoodCategoryParams {
    pub category: String,
    #[serde(default)]
    pub food_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImportFoodCsvParams {
    pub file_path: String,
    /// Include the imported items in the response
    #[serde(default)]
    pub include_items: bool,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl AbcdService {
    // --- Status ---

    #[tool(description = "Get the current status of the ABCD service including build info, reference data version and source, and process information")]
    async fn get_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status(&self.store))
    }

    #[tool(description = "Get instructions for running ABCD nutritional assessments. Call this when starting an assessment session or when unsure which tool to use.")]
    fn assessment_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::ASSESSMENT_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(ASSESSMENT_INSTRUCTIONS)]))
    }

    // --- Classification ---

    #[tool(description = "Classify one measurement (BMI, body fat, lab analyte or dietary ratio) against the reference band for the athlete's age and gender. Height and weight return a growth percentile.")]
    fn classify_measurement(&self, Parameters(p): Parameters<ClassifyMeasurementParams>) -> Result<CallToolResult, McpError> {
        let data = self.store.snapshot();
        let result = classification::classify_measurement(&data, &p.metric, p.value, p.age, &p.gender)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Estimate the growth percentile (5, 10, 25, 50, 75, 90, 95 or 97) of a height or weight. Ages without a table entry return 50.")]
    fn estimate_percentile(&self, Parameters(p): Parameters<EstimatePercentileParams>) -> Result<CallToolResult, McpError> {
        let data = self.store.snapshot();
        let result = classification::estimate_growth_percentile(&data, &p.metric, p.value, p.age, &p.gender)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Combine per-metric statuses into an overall normal, warning or danger status")]
    fn aggregate_status(&self, Parameters(p): Parameters<AggregateStatusParams>) -> Result<CallToolResult, McpError> {
        let entries: Vec<(String, String)> = p.results.into_iter().map(|r| (r.metric, r.status)).collect();
        let result = classification::aggregate_status(&entries).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Assessment ---

    #[tool(description = "Run a full ABCD assessment for one athlete: anthropometry, growth percentiles, biochemistry, dietary intake, overall status and sport targets")]
    fn assess_athlete(&self, Parameters(p): Parameters<AssessAthleteParams>) -> Result<CallToolResult, McpError> {
        let data = self.store.snapshot();
        let result = assessment::assess_athlete(&data, AthleteInput::from(p))
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Derive sport-adjusted calorie, protein, carbohydrate and hydration targets. Unknown sports use the default profile and report fallback=true.")]
    fn derive_sport_targets(&self, Parameters(p): Parameters<DeriveSportTargetsParams>) -> Result<CallToolResult, McpError> {
        let data = self.store.snapshot();
        to_json(&assessment::derive_sport_targets(&data, p.weight_kg, p.base_calories, p.sport.as_deref()))
    }

    // --- Reference Data ---

    #[tool(description = "Get the reference band (BMI, body fat, lab and dietary ranges) for an age and gender")]
    fn get_reference_band(&self, Parameters(p): Parameters<GetReferenceBandParams>) -> Result<CallToolResult, McpError> {
        let data = self.store.snapshot();
        let result = reference::get_reference_band(&data, p.age, &p.gender).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(band) => to_json(&band),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "No reference band", "age": {}, "gender": "{}"}}"#,
                p.age, p.gender
            ))])),
        }
    }

    #[tool(description = "List the known sports with their calorie multiplier, macronutrient ranges and hydration targets")]
    fn list_sports(&self) -> Result<CallToolResult, McpError> {
        let data = self.store.snapshot();
        to_json(&reference::list_sports(&data))
    }

    #[tool(description = "Reload reference data from a JSON file, or from the current source when no path is given. An invalid file is rejected and the current data stays in use.")]
    fn reload_reference_data(&self, Parameters(p): Parameters<ReloadReferenceParams>) -> Result<CallToolResult, McpError> {
        let result = reference::reload_reference_data(&self.store, p.path.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Foods ---

    #[tool(description = "Map a source food category label and food name to one of the nine food groups")]
    fn normalize_food_category(&self, Parameters(p): Parameters<NormalizeFoodCategoryParams>) -> Result<CallToolResult, McpError> {
        to_json(&foods::normalize_food_category(&p.category, &p.food_name))
    }

    #[tool(description = "Import a food composition CSV (Alimento, Categoría, Peso neto g, Energía kcal, Proteína g, Lípidos g, Hidratos de carbono g, Fibra g, Índice glucémico). Malformed numbers are defaulted and counted, never fatal.")]
    fn import_food_csv(&self, Parameters(p): Parameters<ImportFoodCsvParams>) -> Result<CallToolResult, McpError> {
        let result = foods::import_food_csv(&p.file_path, p.include_items).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

#[tool_handler]
impl ServerHandler for AbcdService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "abcd".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("ABCD Nutritional Reference Engine".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "ABCD nutritional assessment for youth athletes aged 5 to 18. \
                 IMPORTANT: Call assessment_instructions first. \
                 Assessment: assess_athlete, derive_sport_targets. \
                 Single metrics: classify_measurement, estimate_percentile, aggregate_status. \
                 Reference data: get_reference_band, list_sports, reload_reference_data. \
                 Foods: normalize_food_category, import_food_csv. \
                 Service: get_status."
                    .into(),
            ),
        }
    }
}
