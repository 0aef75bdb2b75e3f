//! Plant - Crops a medicine can be used on

vocabulary! {
    Plant, "Target plant" {
        Tomato => "Tomato",
        Potato => "Potato",
        Pepper => "Pepper",
        Cucumber => "Cucumber",
        Lettuce => "Lettuce",
        Cabbage => "Cabbage",
        Carrot => "Carrot",
        Onion => "Onion",
        Bean => "Bean",
        Pea => "Pea",
        Corn => "Corn",
        Wheat => "Wheat",
        Rice => "Rice",
        Apple => "Apple",
        Grape => "Grape",
        Rose => "Rose",
        Citrus => "Citrus",
        Strawberry => "Strawberry",
        GeneralVegetables => "General Vegetables",
        GeneralFruits => "General Fruits",
        GeneralOrnamentals => "General Ornamentals",
        AllPlants => "All Plants",
    }
}
