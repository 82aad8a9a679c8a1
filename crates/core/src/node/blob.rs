use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Undecoded payload of a `SetCustomRuntimeData` node (base64 in JSON).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomRuntimeDataBlob(pub Vec<u8>);

impl CustomRuntimeDataBlob {
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for CustomRuntimeDataBlob {
    fn from(bytes: Vec<u8>) -> Self {
        CustomRuntimeDataBlob(bytes)
    }
}

impl Serialize for CustomRuntimeDataBlob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for CustomRuntimeDataBlob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map(CustomRuntimeDataBlob).map_err(serde::de::Error::custom)
    }
}
