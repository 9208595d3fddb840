use cosmwasm_std::Empty;
use cw_multi_test::{Contract, ContractWrapper};
use serde::{Deserialize, Serialize};

/// The contracts this host knows how to deploy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    BookingEscrow,
    IdentityRegistry,
    SosLog,
}

impl ContractKind {
    pub const ALL: [ContractKind; 3] = [
        ContractKind::BookingEscrow,
        ContractKind::IdentityRegistry,
        ContractKind::SosLog,
    ];

    /// Instance label on the chain.
    pub fn label(self) -> &'static str {
        match self {
            ContractKind::BookingEscrow => "booking_escrow",
            ContractKind::IdentityRegistry => "identity_registry",
            ContractKind::SosLog => "sos_log",
        }
    }

    pub fn code(self) -> Box<dyn Contract<Empty>> {
        match self {
            ContractKind::BookingEscrow => {
                use booking_escrow::contract::{execute, instantiate, migrate, query, sudo};
                Box::new(
                    ContractWrapper::new(execute, instantiate, query)
                        .with_migrate(migrate)
                        .with_sudo(sudo),
                )
            }
            ContractKind::IdentityRegistry => {
                use identity_registry::contract::{execute, instantiate, migrate, query, sudo};
                Box::new(
                    ContractWrapper::new(execute, instantiate, query)
                        .with_migrate(migrate)
                        .with_sudo(sudo),
                )
            }
            ContractKind::SosLog => {
                use sos_log::contract::{execute, instantiate, migrate, query, sudo};
                Box::new(
                    ContractWrapper::new(execute, instantiate, query)
                        .with_migrate(migrate)
                        .with_sudo(sudo),
                )
            }
        }
    }
}
