use ics23::ProofSpec;

/// An array of proof specifications, one per level of a chained proof
/// (leaf store first, then the multistore).
///
/// Proof specs travel inside client states, so the raw `ics23::ProofSpec`
/// proto messages are kept as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct ProofSpecs(Vec<ProofSpec>);

impl ProofSpecs {
    /// Returns the specification for Cosmos-SDK proofs
    pub fn cosmos() -> Self {
        vec![
            ics23::iavl_spec(),       // Format of proofs-iavl (iavl merkle proofs)
            ics23::tendermint_spec(), // Format of proofs-tendermint (crypto/ merkle SimpleProof)
        ]
        .into()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProofSpec> {
        self.0.iter()
    }
}

// `ProofSpec` only holds integers, enums and byte strings.
impl Eq for ProofSpecs {}

impl Default for ProofSpecs {
    fn default() -> Self {
        Self::cosmos()
    }
}

impl From<Vec<ProofSpec>> for ProofSpecs {
    fn from(specs: Vec<ProofSpec>) -> Self {
        Self(specs)
    }
}

impl From<ProofSpecs> for Vec<ProofSpec> {
    fn from(specs: ProofSpecs) -> Self {
        specs.0
    }
}
