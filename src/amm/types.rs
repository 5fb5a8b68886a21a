//! Tipos básicos do pool (inteiros sem escala) + U256 para intermediários.
//! Identidades (`Address`) e o par canônico de tokens moram aqui também.

use core::fmt;
use core::str::FromStr;

use uint::construct_uint;
construct_uint! {
    /// Inteiro de 256 bits para contas intermediárias seguras.
    pub struct U256(4);
}

pub type Amount = u128; // unidades base do token
pub type Ppm = u32;     // 0..=1_000_000
pub type Timestamp = u64;

pub const PRICE_SCALE: Amount = 1_000_000_000_000_000_000u128; // 1e18
pub const PPM_SCALE: Ppm = 1_000_000;                           // 1e6 (ppm)

/// Shares retidas para sempre pelo próprio pool no primeiro depósito.
pub const MINIMUM_LOCKED_SHARES: Amount = 1_000;
pub const SHARE_DECIMALS: u8 = 18;

/// Identidade de 20 bytes (conta, contrato de token ou o próprio pool).
/// A ordem é lexicográfica sobre os bytes, igual à comparação numérica do endereço.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    /// Endereço com os 8 bytes finais tirados de `n` (útil em testes e demos).
    pub const fn from_low_u64(n: u64) -> Self {
        let b = n.to_be_bytes();
        let mut out = [0u8; 20];
        let mut i = 0;
        while i < 8 {
            out[12 + i] = b[i];
            i += 1;
        }
        Address(out)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let mut out = [0u8; 20];
        hex::decode_to_slice(raw, &mut out)?;
        Ok(Address(out))
    }
}

/// Par de tokens em ordem canônica (`token_a < token_b`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenPair {
    pub token_a: Address,
    pub token_b: Address,
}

impl TokenPair {
    /// Ordena o par; `None` quando os dois lados são o mesmo token.
    pub fn sorted(x: Address, y: Address) -> Option<Self> {
        match x.cmp(&y) {
            core::cmp::Ordering::Less => Some(Self { token_a: x, token_b: y }),
            core::cmp::Ordering::Greater => Some(Self { token_a: y, token_b: x }),
            core::cmp::Ordering::Equal => None,
        }
    }

    /// `Some(false)` se `x` é o lado A, `Some(true)` se é o lado B.
    pub fn side_of(&self, x: Address) -> Option<bool> {
        if x == self.token_a {
            Some(false)
        } else if x == self.token_b {
            Some(true)
        } else {
            None
        }
    }
}

/// Reservas contabilizadas, sempre na ordem canônica do par.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reserves { pub a: Amount, pub b: Amount }
impl Reserves {
    pub fn new(a: Amount, b: Amount) -> Self { Self { a, b } }

    /// Devolve `(reserve_x, reserve_y)` na orientação pedida pelo chamador.
    pub fn oriented(&self, flipped: bool) -> (Amount, Amount) {
        if flipped { (self.b, self.a) } else { (self.a, self.b) }
    }
}
