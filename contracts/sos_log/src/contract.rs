#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, HexBinary, MessageInfo, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, LatestResponse, MigrateMsg, QueryMsg, SudoMsg};
use crate::state::{AlertSnapshot, LATEST};

pub const CONTRACT_NAME: &str = "safetourx:sos_log";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("creator", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Sos { hash } => execute_sos(deps, env, info, hash),
    }
}

pub fn execute_sos(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    hash: HexBinary,
) -> Result<Response, ContractError> {
    let snapshot = AlertSnapshot {
        hash,
        sender: info.sender,
        timestamp: env.block.time.seconds(),
    };
    LATEST.save(deps.storage, &snapshot)?;
    Ok(Response::new()
        .add_attribute("action", "sos")
        .add_attribute("sender", snapshot.sender.as_str())
        .add_attribute("hash", snapshot.hash.to_hex())
        .add_attribute("time", snapshot.timestamp.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Latest {} => to_json_binary(&LatestResponse {
            latest: LATEST.may_load(deps.storage)?,
        }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::WrongContract {
            actual: stored.contract,
        });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}

/// No per-account state.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(_deps: DepsMut, _env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::ClearState { account } => Ok(Response::new()
            .add_attribute("action", "clear_state")
            .add_attribute("account", account)),
    }
}
