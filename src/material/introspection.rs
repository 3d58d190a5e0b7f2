use crate::base::MaterialError;

/// Identifies a material constant that may be queried or updated by name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterId {
    Young,
    YieldStress,
    Hardening1,
    Hardening2,
    Saturation1,
    Saturation2,
    Implex,
    ImplexControl,
    ImplexErrorTolerance,
    ImplexTimeReductionLimit,
}

/// Identifies a derived output that may be requested by name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseId {
    Stress,
    Strain,
    Tangent,
    Energy,
    ImplexError,
    BackStress,
    PlasticMultiplier,
}

impl ParameterId {
    /// Holds all identifiers
    pub const ALL: [ParameterId; 10] = [
        ParameterId::Young,
        ParameterId::YieldStress,
        ParameterId::Hardening1,
        ParameterId::Hardening2,
        ParameterId::Saturation1,
        ParameterId::Saturation2,
        ParameterId::Implex,
        ParameterId::ImplexControl,
        ParameterId::ImplexErrorTolerance,
        ParameterId::ImplexTimeReductionLimit,
    ];

    /// Returns the name used by hosts
    pub fn name(&self) -> &'static str {
        match self {
            ParameterId::Young => "E",
            ParameterId::YieldStress => "sy",
            ParameterId::Hardening1 => "H1",
            ParameterId::Hardening2 => "H2",
            ParameterId::Saturation1 => "gamma1",
            ParameterId::Saturation2 => "gamma2",
            ParameterId::Implex => "implex",
            ParameterId::ImplexControl => "implexControl",
            ParameterId::ImplexErrorTolerance => "implexErrorTolerance",
            ParameterId::ImplexTimeReductionLimit => "implexTimeReductionLimit",
        }
    }

    /// Finds the identifier by name
    pub fn from_name(name: &str) -> Result<Self, MaterialError> {
        ParameterId::ALL
            .iter()
            .find(|id| id.name() == name)
            .copied()
            .ok_or_else(|| MaterialError::UnknownName(name.to_string()))
    }
}

impl ResponseId {
    /// Holds all identifiers
    pub const ALL: [ResponseId; 7] = [
        ResponseId::Stress,
        ResponseId::Strain,
        ResponseId::Tangent,
        ResponseId::Energy,
        ResponseId::ImplexError,
        ResponseId::BackStress,
        ResponseId::PlasticMultiplier,
    ];

    /// Returns the name used by hosts
    pub fn name(&self) -> &'static str {
        match self {
            ResponseId::Stress => "stress",
            ResponseId::Strain => "strain",
            ResponseId::Tangent => "tangent",
            ResponseId::Energy => "energy",
            ResponseId::ImplexError => "implexError",
            ResponseId::BackStress => "backStress",
            ResponseId::PlasticMultiplier => "plasticMultiplier",
        }
    }

    /// Finds the identifier by name
    pub fn from_name(name: &str) -> Result<Self, MaterialError> {
        ResponseId::ALL
            .iter()
            .find(|id| id.name() == name)
            .copied()
            .ok_or_else(|| MaterialError::UnknownName(name.to_string()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
