//! Catálogo imutável de erros do pool.
use core::fmt;

/// Código de erro do pool.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum PoolErrorCode {
    /// Prazo da chamada já passou.
    Expired,
    /// Os dois lados do par são o mesmo token.
    IdenticalTokens,
    /// Caminho de swap diferente de `[token_in, token_out]`.
    InvalidPath,
    /// Montante de entrada zero.
    ZeroInputAmount,
    /// Primeiro depósito não supera as shares travadas.
    ZeroInitialLiquidity,
    /// Shares a queimar zeradas ou acima do saldo.
    InvalidLiquidity,
    /// Montante do lado A abaixo do mínimo pedido.
    InsufficientAmountA,
    /// Montante do lado B abaixo do mínimo pedido.
    InsufficientAmountB,
    /// Saída do swap abaixo do mínimo pedido.
    InsufficientOutputAmount,
    /// Pool vazio ou operação que arredonda para nada.
    InsufficientLiquidity,
    /// Par informado não é o par do pool.
    TokenNotInPair,
    /// Nenhum excedente recuperável.
    NoTokensToRecover,
    /// Saldo nativo zerado.
    NoEthToWithdraw,
    /// Destinatário recusou a moeda nativa.
    EthTransferFailed,
    /// Chamador não é o dono.
    UnauthorizedAccount,
    /// Overflow ou underflow em cálculos numéricos.
    Overflow,
    /// Reentrada enquanto outra operação está em curso.
    ReentrantCall,
    /// Novo dono inválido (endereço zero).
    InvalidOwner,
    /// Ledger externo recusou a movimentação.
    LedgerRejected,
}

impl PoolErrorCode {
    /// Código textual estável do erro.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Expired => "SWP-0001",
            Self::IdenticalTokens => "SWP-0002",
            Self::InvalidPath => "SWP-0003",
            Self::ZeroInputAmount => "SWP-0004",
            Self::ZeroInitialLiquidity => "SWP-0005",
            Self::InvalidLiquidity => "SWP-0006",
            Self::InsufficientAmountA => "SWP-0007",
            Self::InsufficientAmountB => "SWP-0008",
            Self::InsufficientOutputAmount => "SWP-0009",
            Self::InsufficientLiquidity => "SWP-0010",
            Self::TokenNotInPair => "SWP-0011",
            Self::NoTokensToRecover => "SWP-0012",
            Self::NoEthToWithdraw => "SWP-0013",
            Self::EthTransferFailed => "SWP-0014",
            Self::UnauthorizedAccount => "SWP-0015",
            Self::Overflow => "SWP-0016",
            Self::ReentrantCall => "SWP-0017",
            Self::InvalidOwner => "SWP-0018",
            Self::LedgerRejected => "SWP-0019",
        }
    }

    /// Título curto em português.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Expired => "Prazo expirado",
            Self::IdenticalTokens => "Tokens idênticos",
            Self::InvalidPath => "Caminho inválido",
            Self::ZeroInputAmount => "Entrada zerada",
            Self::ZeroInitialLiquidity => "Liquidez inicial insuficiente",
            Self::InvalidLiquidity => "Shares inválidas",
            Self::InsufficientAmountA => "Montante A insuficiente",
            Self::InsufficientAmountB => "Montante B insuficiente",
            Self::InsufficientOutputAmount => "Saída insuficiente",
            Self::InsufficientLiquidity => "Liquidez insuficiente",
            Self::TokenNotInPair => "Token fora do par",
            Self::NoTokensToRecover => "Nada a recuperar",
            Self::NoEthToWithdraw => "Sem saldo nativo",
            Self::EthTransferFailed => "Transferência nativa recusada",
            Self::UnauthorizedAccount => "Conta não autorizada",
            Self::Overflow => "Overflow numérico",
            Self::ReentrantCall => "Reentrada bloqueada",
            Self::InvalidOwner => "Dono inválido",
            Self::LedgerRejected => "Ledger recusou",
        }
    }

    /// Mensagem base em português (placeholders `{chave}` vêm do contexto).
    pub const fn message_pt(&self) -> &'static str {
        match self {
            Self::Expired => "prazo {deadline} expirou em {now}",
            Self::IdenticalTokens => "token_x e token_y devem ser diferentes",
            Self::InvalidPath => "path deve ter exatamente 2 tokens",
            Self::ZeroInputAmount => "amount_in deve ser > 0",
            Self::ZeroInitialLiquidity => "shares iniciais devem superar o mínimo travado",
            Self::InvalidLiquidity => "shares devem ser > 0 e <= saldo",
            Self::InsufficientAmountA => "montante A abaixo do mínimo",
            Self::InsufficientAmountB => "montante B abaixo do mínimo",
            Self::InsufficientOutputAmount => "saída abaixo de amount_out_min",
            Self::InsufficientLiquidity => "reservas insuficientes para a operação",
            Self::TokenNotInPair => "token não pertence ao par do pool",
            Self::NoTokensToRecover => "sem excedente para recuperar",
            Self::NoEthToWithdraw => "saldo nativo do pool é 0",
            Self::EthTransferFailed => "destinatário recusou a moeda nativa",
            Self::UnauthorizedAccount => "conta {account} não é o dono",
            Self::Overflow => "overflow/underflow numérico",
            Self::ReentrantCall => "operação já em curso no pool",
            Self::InvalidOwner => "novo dono não pode ser o endereço zero",
            Self::LedgerRejected => "ledger do token recusou: {reason}",
        }
    }

    /// Retorna todas as variantes em ordem estável.
    pub fn all() -> &'static [PoolErrorCode] {
        const ALL: &[PoolErrorCode] = &[
            PoolErrorCode::Expired,
            PoolErrorCode::IdenticalTokens,
            PoolErrorCode::InvalidPath,
            PoolErrorCode::ZeroInputAmount,
            PoolErrorCode::ZeroInitialLiquidity,
            PoolErrorCode::InvalidLiquidity,
            PoolErrorCode::InsufficientAmountA,
            PoolErrorCode::InsufficientAmountB,
            PoolErrorCode::InsufficientOutputAmount,
            PoolErrorCode::InsufficientLiquidity,
            PoolErrorCode::TokenNotInPair,
            PoolErrorCode::NoTokensToRecover,
            PoolErrorCode::NoEthToWithdraw,
            PoolErrorCode::EthTransferFailed,
            PoolErrorCode::UnauthorizedAccount,
            PoolErrorCode::Overflow,
            PoolErrorCode::ReentrantCall,
            PoolErrorCode::InvalidOwner,
            PoolErrorCode::LedgerRejected,
        ];
        ALL
    }
}

impl fmt::Display for PoolErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mensagem padrão na localidade ativa (pt-BR).
pub fn default_locale_message(code: PoolErrorCode) -> &'static str {
    code.message_pt()
}
