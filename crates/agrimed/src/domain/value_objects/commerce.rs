//! Listing and seller vocabularies

vocabulary! {
    #[derive(Default)]
    Currency, "Currency" {
        #[default]
        Usd => "USD",
        Eur => "EUR",
        Gbp => "GBP",
        Rwf => "RWF",
        Kes => "KES",
        Ugx => "UGX",
        Tzs => "TZS",
    }
}

vocabulary! {
    /// Stock status of a listing. Listings are scoped to `Available` unless asked otherwise.
    #[derive(Default)]
    Availability, "Availability" {
        #[default]
        Available => "Available",
        Sold => "Sold",
        Reserved => "Reserved",
        Unavailable => "Unavailable",
    }
}

vocabulary! {
    #[derive(Default)]
    BusinessType, "Business type" {
        #[default]
        AgriculturalStore => "Agricultural Store",
        Pharmacy => "Pharmacy",
        OnlineRetailer => "Online Retailer",
        Manufacturer => "Manufacturer",
        Distributor => "Distributor",
        IndividualSeller => "Individual Seller",
    }
}

vocabulary! {
    Certification, "Certification" {
        OrganicCertified => "Organic Certified",
        EpaRegistered => "EPA Registered",
        FdaApproved => "FDA Approved",
        IsoCertified => "ISO Certified",
        LocalAuthorityApproved => "Local Authority Approved",
    }
}
