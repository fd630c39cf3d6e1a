use anyhow::bail;

/// Icons an appointment type can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeIcon {
    Plane,
    Car,
    Briefcase,
    User,
    Star,
    Home,
    MapPin,
    Coffee,
    ShoppingBag,
    Heart,
    Gift,
    Calendar,
    Clock,
    Truck,
    Bus,
    Train,
    Ship,
    Rocket,
    Building,
}

pub const ALL_ICONS: [TypeIcon; 19] = [
    TypeIcon::Plane,
    TypeIcon::Car,
    TypeIcon::Briefcase,
    TypeIcon::User,
    TypeIcon::Star,
    TypeIcon::Home,
    TypeIcon::MapPin,
    TypeIcon::Coffee,
    TypeIcon::ShoppingBag,
    TypeIcon::Heart,
    TypeIcon::Gift,
    TypeIcon::Calendar,
    TypeIcon::Clock,
    TypeIcon::Truck,
    TypeIcon::Bus,
    TypeIcon::Train,
    TypeIcon::Ship,
    TypeIcon::Rocket,
    TypeIcon::Building,
];

impl TypeIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeIcon::Plane => "Plane",
            TypeIcon::Car => "Car",
            TypeIcon::Briefcase => "Briefcase",
            TypeIcon::User => "User",
            TypeIcon::Star => "Star",
            TypeIcon::Home => "Home",
            TypeIcon::MapPin => "MapPin",
            TypeIcon::Coffee => "Coffee",
            TypeIcon::ShoppingBag => "ShoppingBag",
            TypeIcon::Heart => "Heart",
            TypeIcon::Gift => "Gift",
            TypeIcon::Calendar => "Calendar",
            TypeIcon::Clock => "Clock",
            TypeIcon::Truck => "Truck",
            TypeIcon::Bus => "Bus",
            TypeIcon::Train => "Train",
            TypeIcon::Ship => "Ship",
            TypeIcon::Rocket => "Rocket",
            TypeIcon::Building => "Building",
        }
    }
}

impl Default for TypeIcon {
    fn default() -> Self {
        TypeIcon::Car
    }
}

impl std::str::FromStr for TypeIcon {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match ALL_ICONS.iter().find(|icon| icon.as_str() == s) {
            Some(icon) => Ok(*icon),
            None => bail!("unknown icon: {}", s),
        }
    }
}

/// Preset colors offered when creating a type, `(name, hex)`.
pub const PRESET_COLORS: [(&str, &str); 8] = [
    ("purple", "#9333ea"),
    ("blue", "#3b82f6"),
    ("cyan", "#06b6d4"),
    ("green", "#10b981"),
    ("yellow", "#f59e0b"),
    ("red", "#ef4444"),
    ("pink", "#ec4899"),
    ("gray", "#64748b"),
];

/// Accepts any `#rrggbb` color, normalized to lowercase.
pub fn parse_color(s: &str) -> anyhow::Result<String> {
    let hex = match s.strip_prefix('#') {
        Some(hex) => hex,
        None => bail!("color must start with '#': {}", s),
    };
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("color must be #rrggbb: {}", s);
    }
    Ok(s.to_ascii_lowercase())
}
