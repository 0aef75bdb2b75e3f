//! Medicine product vocabularies

vocabulary! {
    /// Treatment category of a medicine
    MedicineType, "Medicine type" {
        Fungicide => "Fungicide",
        Bactericide => "Bactericide",
        OrganicTreatment => "Organic Treatment",
        BiologicalControl => "Biological Control",
        ChemicalPesticide => "Chemical Pesticide",
        PreventiveTreatment => "Preventive Treatment",
        SystemicTreatment => "Systemic Treatment",
        ContactTreatment => "Contact Treatment",
        CopperBased => "Copper-based",
        SulfurBased => "Sulfur-based",
    }
}

vocabulary! {
    /// How the medicine is applied to the crop
    ApplicationMethod, "Application method" {
        FoliarSpray => "Foliar Spray",
        SoilDrench => "Soil Drench",
        SeedTreatment => "Seed Treatment",
        RootDip => "Root Dip",
        Injection => "Injection",
        Dusting => "Dusting",
        GranularApplication => "Granular Application",
        SystemicApplication => "Systemic Application",
    }
}

vocabulary! {
    PackageUnit, "Package size unit" {
        Milliliter => "ml",
        Liter => "L",
        Gram => "g",
        Kilogram => "kg",
        Ounce => "oz",
        Pound => "lb",
        Tablets => "tablets",
        Sachets => "sachets",
    }
}

vocabulary! {
    /// Product condition, best first
    Condition, "Condition" {
        New => "New",
        LikeNew => "Like New",
        Good => "Good",
        Fair => "Fair",
        Poor => "Poor",
    }
}
