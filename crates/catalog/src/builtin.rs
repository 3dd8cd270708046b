/// One statically known catalog group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinDefinition {
    pub name: &'static str,
    pub group: &'static str,
}

/// Group value meaning "no group selected". Never becomes a source.
pub const NONE_GROUP: &str = "none";

/// Legacy group value meaning "the user's custom data is the source".
pub const CUSTOM_GROUP: &str = "custom";

/// Id namespace for built-in catalog groups.
pub const BUILTIN_PREFIX: &str = "celestrak:";

/// Id namespace for user-added sources.
pub const CUSTOM_PREFIX: &str = "custom:";

/// Built-in source id for a catalog group slug.
pub fn builtin_id(group: &str) -> String {
    format!("{BUILTIN_PREFIX}{group}")
}

/// Catalog groups offered out of the box, in display order.
pub const BUILTIN_SOURCES: &[BuiltinDefinition] = &[
    BuiltinDefinition { name: "None", group: NONE_GROUP },
    BuiltinDefinition { name: "Brightest (Visual)", group: "visual" },
    BuiltinDefinition { name: "Space Stations", group: "stations" },
    BuiltinDefinition { name: "Last 30 Days' Launches", group: "last-30-days" },
    BuiltinDefinition { name: "Active Satellites", group: "active" },
    BuiltinDefinition { name: "Starlink", group: "starlink" },
    BuiltinDefinition { name: "OneWeb", group: "oneweb" },
    BuiltinDefinition { name: "GPS Operational", group: "gps-ops" },
    BuiltinDefinition { name: "Galileo", group: "galileo" },
    BuiltinDefinition { name: "GLONASS Operational", group: "glo-ops" },
    BuiltinDefinition { name: "Beidou", group: "beidou" },
    BuiltinDefinition { name: "Weather", group: "weather" },
    BuiltinDefinition { name: "NOAA", group: "noaa" },
    BuiltinDefinition { name: "GOES", group: "goes" },
    BuiltinDefinition { name: "Earth Resources", group: "resource" },
    BuiltinDefinition { name: "Space & Earth Science", group: "science" },
    BuiltinDefinition { name: "Geostationary", group: "geo" },
    BuiltinDefinition { name: "Amateur Radio", group: "amateur" },
    BuiltinDefinition { name: "CubeSats", group: "cubesat" },
];
