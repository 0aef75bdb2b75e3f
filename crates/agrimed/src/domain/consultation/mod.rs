//! Consultation - Requests to the plant disease advisor
//!
//! Each kind carries one required field, renders a fixed expert prompt and
//! describes how the exchange is stored in the prompt history.

mod templates;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use utoipa::ToSchema;

use crate::domain::entities::NewPromptRecord;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::PromptType;

const NOT_SPECIFIED: &str = "Not specified";

/// Free-text question
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GeneralRequest {
    pub prompt: Option<String>,
}

/// Symptom based diagnosis
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    pub symptoms: Option<String>,
    pub plant_type: Option<String>,
    pub location: Option<String>,
    /// Image references supplied alongside the symptoms
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRequest {
    pub disease: Option<String>,
    pub plant_type: Option<String>,
    pub severity: Option<String>,
    pub organic_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreventionRequest {
    pub plant_type: Option<String>,
    pub region: Option<String>,
    pub season: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub common_diseases: Option<TextOrList>,
}

/// Disease identified by an image classifier
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseInfoRequest {
    pub disease_name: Option<String>,
    pub plant_type: Option<String>,
    /// Classifier confidence, in percent
    pub confidence: Option<f64>,
    pub additional_info: Option<String>,
}

/// Treatment plan for a classifier detection
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiTreatmentRequest {
    pub disease_name: Option<String>,
    pub plant_type: Option<String>,
    pub confidence: Option<f64>,
    pub severity: Option<String>,
    pub organic_preference: Option<bool>,
    pub location: Option<String>,
}

/// A single string or a list of strings, as clients send either
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

impl TextOrList {
    fn joined(&self) -> String {
        match self {
            TextOrList::Text(s) => s.trim().to_string(),
            TextOrList::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// One advisor request of any kind
#[derive(Debug, Clone)]
pub enum Consultation {
    General(GeneralRequest),
    Diagnosis(DiagnosisRequest),
    Treatment(TreatmentRequest),
    Prevention(PreventionRequest),
    DiseaseInfo(DiseaseInfoRequest),
    AiTreatment(AiTreatmentRequest),
}

impl Consultation {
    pub fn prompt_type(&self) -> PromptType {
        match self {
            Consultation::General(_) => PromptType::General,
            Consultation::Diagnosis(_) => PromptType::Diagnosis,
            Consultation::Treatment(_) => PromptType::Treatment,
            Consultation::Prevention(_) => PromptType::Prevention,
            Consultation::DiseaseInfo(_) => PromptType::DiseaseInfo,
            Consultation::AiTreatment(_) => PromptType::AiTreatment,
        }
    }

    /// Check the one field each kind cannot do without
    pub fn validate(&self) -> Result<(), DomainError> {
        let (value, message) = match self {
            Consultation::General(r) => (&r.prompt, "Prompt is required"),
            Consultation::Diagnosis(r) => (&r.symptoms, "Disease symptoms are required"),
            Consultation::Treatment(r) => (&r.disease, "Disease name is required"),
            Consultation::Prevention(r) => (&r.plant_type, "Plant type is required"),
            Consultation::DiseaseInfo(r) => (&r.disease_name, "Disease name is required"),
            Consultation::AiTreatment(r) => (&r.disease_name, "Disease name is required"),
        };
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Ok(()),
            _ => Err(DomainError::validation(message)),
        }
    }

    /// Full prompt sent to the model
    pub fn render_prompt(&self) -> String {
        match self {
            Consultation::General(r) => templates::general(text(&r.prompt, "")),
            Consultation::Diagnosis(r) => templates::diagnosis(
                text(&r.plant_type, NOT_SPECIFIED),
                text(&r.location, NOT_SPECIFIED),
                text(&r.symptoms, ""),
                r.images.as_ref().is_some_and(|i| !i.is_empty()),
            ),
            Consultation::Treatment(r) => templates::treatment(
                text(&r.disease, ""),
                text(&r.plant_type, "General"),
                text(&r.severity, NOT_SPECIFIED),
                r.organic_only.unwrap_or(false),
            ),
            Consultation::Prevention(r) => {
                let common = r
                    .common_diseases
                    .as_ref()
                    .map(TextOrList::joined)
                    .filter(|s| !s.is_empty());
                templates::prevention(
                    text(&r.plant_type, ""),
                    text(&r.region, NOT_SPECIFIED),
                    text(&r.season, NOT_SPECIFIED),
                    common.as_deref().unwrap_or(NOT_SPECIFIED),
                )
            }
            Consultation::DiseaseInfo(r) => templates::disease_info(
                text(&r.disease_name, ""),
                text(&r.plant_type, NOT_SPECIFIED),
                &percent(r.confidence),
                text(&r.additional_info, "None"),
            ),
            Consultation::AiTreatment(r) => templates::ai_treatment(
                text(&r.disease_name, ""),
                text(&r.plant_type, NOT_SPECIFIED),
                &percent(r.confidence),
                text(&r.severity, NOT_SPECIFIED),
                r.organic_preference.unwrap_or(false),
                text(&r.location, NOT_SPECIFIED),
            ),
        }
    }

    /// History entry for this exchange
    pub fn to_record(&self, response: &str) -> NewPromptRecord {
        let mut record = NewPromptRecord {
            ai_response: response.to_string(),
            prompt_type: self.prompt_type(),
            ..Default::default()
        };
        match self {
            Consultation::General(r) => {
                record.user_prompt = text(&r.prompt, "").to_string();
            }
            Consultation::Diagnosis(r) => {
                record.user_prompt = format!(
                    "DIAGNOSIS REQUEST - Plant: {}, Symptoms: {}",
                    text(&r.plant_type, NOT_SPECIFIED),
                    text(&r.symptoms, "")
                );
                record.plant_type = owned(&r.plant_type);
                record.region = owned(&r.location);
            }
            Consultation::Treatment(r) => {
                record.user_prompt = format!(
                    "TREATMENT REQUEST - Disease: {}, Plant: {}",
                    text(&r.disease, ""),
                    text(&r.plant_type, NOT_SPECIFIED)
                );
                record.plant_type = owned(&r.plant_type);
                record.disease_type = owned(&r.disease);
                record.severity = owned(&r.severity);
                record.organic_only = r.organic_only.unwrap_or(false);
            }
            Consultation::Prevention(r) => {
                record.user_prompt = format!(
                    "PREVENTION REQUEST - Plant: {}, Region: {}",
                    text(&r.plant_type, ""),
                    text(&r.region, NOT_SPECIFIED)
                );
                record.plant_type = owned(&r.plant_type);
                record.region = owned(&r.region);
            }
            Consultation::DiseaseInfo(r) => {
                record.user_prompt = format!(
                    "DISEASE INFO REQUEST - Disease: {}, Plant: {}, Confidence: {}",
                    text(&r.disease_name, ""),
                    text(&r.plant_type, NOT_SPECIFIED),
                    percent(r.confidence)
                );
                record.plant_type = owned(&r.plant_type);
                record.disease_type = owned(&r.disease_name);
                record.confidence = r.confidence;
            }
            Consultation::AiTreatment(r) => {
                record.user_prompt = format!(
                    "AI TREATMENT REQUEST - Disease: {}, Plant: {}, Confidence: {}",
                    text(&r.disease_name, ""),
                    text(&r.plant_type, NOT_SPECIFIED),
                    percent(r.confidence)
                );
                record.plant_type = owned(&r.plant_type);
                record.disease_type = owned(&r.disease_name);
                record.region = owned(&r.location);
                record.severity = owned(&r.severity);
                record.confidence = r.confidence;
                record.organic_only = r.organic_preference.unwrap_or(false);
            }
        }
        record
    }

    /// Envelope message on success
    pub fn success_message(&self) -> &'static str {
        match self {
            Consultation::General(_) => "Content generated successfully",
            Consultation::Diagnosis(_) => "Disease diagnosis completed",
            Consultation::Treatment(_) => "Treatment recommendations generated",
            Consultation::Prevention(_) => "Prevention strategies generated",
            Consultation::DiseaseInfo(_) => "Disease information generated successfully",
            Consultation::AiTreatment(_) => "AI-based treatment recommendations generated",
        }
    }

    /// Envelope message when the provider fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Consultation::General(_) => "Failed to generate content",
            Consultation::Diagnosis(_) => "Failed to diagnose disease",
            Consultation::Treatment(_) | Consultation::AiTreatment(_) => {
                "Failed to generate treatment recommendations"
            }
            Consultation::Prevention(_) => "Failed to generate prevention strategies",
            Consultation::DiseaseInfo(_) => "Failed to generate disease information",
        }
    }

    /// Response data: the request fields echoed back plus the answer under a
    /// kind-specific key
    pub fn response_data(&self, answer: &str) -> Map<String, Value> {
        let value = match self {
            Consultation::General(r) => json!({
                "prompt": r.prompt,
                "response": answer,
            }),
            Consultation::Diagnosis(r) => json!({
                "plantType": r.plant_type,
                "symptoms": r.symptoms,
                "diagnosis": answer,
            }),
            Consultation::Treatment(r) => json!({
                "disease": r.disease,
                "plantType": r.plant_type,
                "organicOnly": r.organic_only,
                "recommendations": answer,
            }),
            Consultation::Prevention(r) => json!({
                "plantType": r.plant_type,
                "region": r.region,
                "season": r.season,
                "strategies": answer,
            }),
            Consultation::DiseaseInfo(r) => json!({
                "diseaseName": r.disease_name,
                "plantType": r.plant_type,
                "confidence": r.confidence,
                "diseaseInfo": answer,
            }),
            Consultation::AiTreatment(r) => json!({
                "diseaseName": r.disease_name,
                "plantType": r.plant_type,
                "confidence": r.confidence,
                "severity": r.severity,
                "organicPreference": r.organic_preference,
                "treatmentPlan": answer,
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

fn text<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
}

fn owned(value: &Option<String>) -> Option<String> {
    let v = text(value, "");
    (!v.is_empty()).then(|| v.to_string())
}

fn percent(confidence: Option<f64>) -> String {
    match confidence {
        Some(c) => format!("{}%", c),
        None => "Not provided".to_string(),
    }
}
