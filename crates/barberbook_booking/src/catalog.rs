// --- File: crates/barberbook_booking/src/catalog.rs ---
//! The shop's two static catalogs: who cuts, and what they offer.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Barber {
    pub key: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub rating: &'static str,
    /// Portrait URL; `None` until real photos are uploaded.
    pub photo: Option<&'static str>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategoryKey {
    Cuts,
    BeardShave,
    Extras,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ServiceBadge {
    #[serde(rename = "Most popular")]
    MostPopular,
    #[serde(rename = "Best value")]
    BestValue,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Service {
    pub key: &'static str,
    pub category: ServiceCategoryKey,
    pub name: &'static str,
    /// Duration in minutes.
    pub mins: u32,
    /// Whole pounds; used in the payload and the confirm label.
    pub price: u32,
    /// Display price, may be a range like "£7–£15".
    pub price_label: &'static str,
    pub desc: &'static str,
    pub details: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<ServiceBadge>,
}

#[derive(Serialize, Debug, Clone, Copy)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceCategory {
    pub key: ServiceCategoryKey,
    pub label: &'static str,
    pub blurb: &'static str,
    pub img: &'static str,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Service>))]
    pub services: &'static [Service],
}

pub static BARBERS: [Barber; 3] = [
    Barber {
        key: "mason",
        name: "Mason",
        role: "Senior Barber",
        rating: "★ 4.9",
        photo: None,
    },
    Barber {
        key: "oliver",
        name: "Oliver",
        role: "Skin Fade Specialist",
        rating: "★ 4.9",
        photo: None,
    },
    Barber {
        key: "theo",
        name: "Theo",
        role: "Classic Cuts",
        rating: "★ 4.9",
        photo: None,
    },
];

const fn service(
    key: &'static str,
    category: ServiceCategoryKey,
    name: &'static str,
    mins: u32,
    price: u32,
    price_label: &'static str,
    desc: &'static str,
    details: &'static str,
    badge: Option<ServiceBadge>,
) -> Service {
    Service {
        key,
        category,
        name,
        mins,
        price,
        price_label,
        desc,
        details,
        badge,
    }
}

use ServiceCategoryKey::{BeardShave, Cuts, Extras};

static CUTS: [Service; 7] = [
    service("mens_haircut", Cuts, "Men’s haircut", 45, 22, "£22",
        "Classic cut, tidy finish.",
        "Classic cut with a clean neckline + tidy finish.", None),
    service("mens_haircut_admiral", Cuts, "Men’s haircut “Admiral”", 50, 26, "£26",
        "Extra time, extra precision.",
        "More time for precision work and styling.", None),
    service("skin_fade", Cuts, "Skin fade", 50, 28, "£28",
        "Clean blend, crisp edges.",
        "Clean blend, crisp edges. Includes line-up + tidy finish.",
        Some(ServiceBadge::MostPopular)),
    service("haircut_beard", Cuts, "Haircut + beard", 60, 30, "£30",
        "Full refresh, balanced shape.",
        "Haircut + beard tidy. Balanced shape, clean neckline.",
        Some(ServiceBadge::BestValue)),
    service("childrens_haircut", Cuts, "Children’s haircut", 35, 17, "£17",
        "Quick, calm, clean.",
        "Gentle cut with a tidy finish. No stress.", None),
    service("hair_wash_style", Cuts, "Hair wash + style", 10, 8, "£8",
        "Fresh wash, styled finish.",
        "Wash + quick style to finish your look.", None),
    service("hair_treatments", Cuts, "Hair treatments", 15, 12, "£7–£15",
        "Scalp + hair boost.",
        "Treatment varies by hair type. Final price confirmed in shop.", None),
];

static BEARD_SHAVE: [Service; 6] = [
    service("beard_care_shape", BeardShave, "Beard care (shape)", 15, 7, "£7",
        "Neckline + quick tidy.",
        "Quick shape-up: neckline + cheek line tidy.", None),
    service("beard_trim", BeardShave, "Beard trim", 20, 14, "£14",
        "Balanced length, clean lines.",
        "Trim + tidy cheek lines + clean neckline.", None),
    service("beard_sculpt_lineup", BeardShave, "Beard sculpt + line-up", 25, 16, "£16",
        "Sharper edges, sculpted shape.",
        "Detailed sculpt + crisp line-up + symmetry work.", None),
    service("beard_colouring", BeardShave, "Beard colouring", 30, 15, "£15",
        "Tone + blend, natural look.",
        "Colour blend for a natural finish. Final shade confirmed in shop.", None),
    service("shaving_regular", BeardShave, "Shaving (regular)", 20, 12, "£12",
        "Smooth shave, simple finish.",
        "Regular shave with a clean finish. Sensitive-skin friendly.", None),
    service("hot_towel_shave", BeardShave, "Hot towel shave", 30, 18, "£18",
        "Warm towel, close finish.",
        "Warm towel + close shave. Clean and comfortable.", None),
];

static EXTRAS: [Service; 7] = [
    service("eyebrows", Extras, "Eyebrows", 10, 6, "£6",
        "Clean shape, natural.",
        "Quick tidy + shape. Natural finish.", None),
    service("nose_wax", Extras, "Nose wax", 10, 8, "£8",
        "Fast, clean, done.",
        "Quick wax. Clean and hygienic.", None),
    service("face_cleanse", Extras, "Face cleanse", 15, 10, "£10",
        "Fresh face reset.",
        "Cleanse + refresh. Great after a cut.", None),
    service("black_mask", Extras, "Black mask", 20, 12, "£12",
        "Deep clean feel.",
        "Mask + clean-up. Leaves skin feeling fresh.", None),
    service("steam_towel_finish", Extras, "Steam towel finish", 10, 8, "£8",
        "Warm finish, premium touch.",
        "Steam towel finish to complete your service.", None),
    service("head_massage", Extras, "Head massage", 15, 10, "£10",
        "Relax, reset, recharge.",
        "Short head massage. Great add-on.", None),
    service("scalp_detox", Extras, "Scalp detox", 25, 16, "£16",
        "Scalp refresh + comfort.",
        "Detox treatment for scalp comfort and freshness.", None),
];

pub static SERVICE_CATEGORIES: [ServiceCategory; 3] = [
    ServiceCategory {
        key: Cuts,
        label: "CUTS",
        blurb: "Clean fades. Sharp lines. Zero drama.",
        img: "https://images.unsplash.com/photo-1599351431618-3174d19c93a5?auto=format&fit=crop&w=1400&q=80",
        services: &CUTS,
    },
    ServiceCategory {
        key: BeardShave,
        label: "BEARD & SHAVE",
        blurb: "Tidy shape. Hot towel finish.",
        img: "https://images.unsplash.com/photo-1517832606299-7ae9b720a186?auto=format&fit=crop&w=1400&q=80",
        services: &BEARD_SHAVE,
    },
    ServiceCategory {
        key: Extras,
        label: "EXTRAS",
        blurb: "Small details. Big upgrade.",
        img: "https://images.unsplash.com/photo-1519741497674-611481863552?auto=format&fit=crop&w=1400&q=80",
        services: &EXTRAS,
    },
];

/// Quick picks for a note field.
pub const NOTE_CHIPS: [&str; 4] = [
    "Beard trim",
    "Skin fade length",
    "Sensitive skin",
    "No clipper zero",
];

pub fn barbers() -> &'static [Barber] {
    &BARBERS
}

pub fn categories() -> &'static [ServiceCategory] {
    &SERVICE_CATEGORIES
}

/// Every service, category order preserved.
pub fn services() -> impl Iterator<Item = &'static Service> {
    SERVICE_CATEGORIES.iter().flat_map(|c| c.services.iter())
}

pub fn find_barber(key: &str) -> Option<&'static Barber> {
    BARBERS.iter().find(|b| b.key == key)
}

pub fn find_service(key: &str) -> Option<&'static Service> {
    services().find(|s| s.key == key)
}
