use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Represents the ScriptPublicKey Version
pub type ScriptPublicKeyVersion = u16;

const OP_DUP: u8 = 0x76;
const OP_HASH160: u8 = 0xa9;
const OP_EQUAL: u8 = 0x87;
const OP_EQUALVERIFY: u8 = 0x88;
const OP_CHECKSIG: u8 = 0xac;
const OP_PUSH_20: u8 = 0x14;

/// Standard script templates that have an address form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptClass<'a> {
    PubKeyHash(&'a [u8; 20]),
    ScriptHash(&'a [u8; 20]),
    NonStandard,
}

/// The locking script of a transaction output
#[derive(Default, PartialEq, Eq, Clone, Hash, PartialOrd, Ord, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct ScriptPublicKey {
    #[serde(default)]
    pub version: ScriptPublicKeyVersion,
    #[serde(with = "hex::serde")]
    script: Vec<u8>, // Kept private to preserve read-only semantics
}

impl std::fmt::Debug for ScriptPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptPublicKey").field("version", &self.version).field("script", &hex::encode(&self.script)).finish()
    }
}

impl std::fmt::Display for ScriptPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.script))
    }
}

impl ScriptPublicKey {
    pub fn from_vec(version: ScriptPublicKeyVersion, script: Vec<u8>) -> Self {
        Self { version, script }
    }

    pub fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, hex::FromHexError> {
        Ok(Self::from_vec(0, hex::decode(hex)?))
    }

    /// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`
    pub fn p2pkh(pubkey_hash: &[u8; 20]) -> Self {
        let mut script = vec![OP_DUP, OP_HASH160, OP_PUSH_20];
        script.extend_from_slice(pubkey_hash);
        script.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
        Self::from_vec(0, script)
    }

    /// `OP_HASH160 <20 bytes> OP_EQUAL`
    pub fn p2sh(script_hash: &[u8; 20]) -> Self {
        let mut script = vec![OP_HASH160, OP_PUSH_20];
        script.extend_from_slice(script_hash);
        script.push(OP_EQUAL);
        Self::from_vec(0, script)
    }

    pub fn version(&self) -> ScriptPublicKeyVersion {
        self.version
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn class(&self) -> ScriptClass<'_> {
        let s = self.script.as_slice();
        match s.len() {
            25 if s[0] == OP_DUP && s[1] == OP_HASH160 && s[2] == OP_PUSH_20 && s[23] == OP_EQUALVERIFY && s[24] == OP_CHECKSIG => {
                s[3..23].try_into().map(ScriptClass::PubKeyHash).unwrap_or(ScriptClass::NonStandard)
            }
            23 if s[0] == OP_HASH160 && s[1] == OP_PUSH_20 && s[22] == OP_EQUAL => {
                s[2..22].try_into().map(ScriptClass::ScriptHash).unwrap_or(ScriptClass::NonStandard)
            }
            _ => ScriptClass::NonStandard,
        }
    }
}
