//! Disease - Plant diseases a medicine can target

vocabulary! {
    Disease, "Target disease" {
        EarlyBlight => "Early Blight",
        LateBlight => "Late Blight",
        PowderyMildew => "Powdery Mildew",
        DownyMildew => "Downy Mildew",
        BlackSpot => "Black Spot",
        Rust => "Rust",
        Anthracnose => "Anthracnose",
        BacterialWilt => "Bacterial Wilt",
        FusariumWilt => "Fusarium Wilt",
        VerticilliumWilt => "Verticillium Wilt",
        RootRot => "Root Rot",
        LeafSpot => "Leaf Spot",
        Canker => "Canker",
        FireBlight => "Fire Blight",
        Scab => "Scab",
        MosaicVirus => "Mosaic Virus",
        Yellowing => "Yellowing",
        Blight => "Blight",
        Other => "Other",
    }
}
