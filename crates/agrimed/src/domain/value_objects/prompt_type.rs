//! PromptType - Classification of a stored AI exchange

vocabulary! {
    #[derive(Default)]
    PromptType, "Prompt type" {
        #[default]
        General => "general",
        Diagnosis => "diagnosis",
        Treatment => "treatment",
        Prevention => "prevention",
        DiseaseInfo => "disease_info",
        AiTreatment => "ai_treatment",
    }
}
