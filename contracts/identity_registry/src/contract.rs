#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, HexBinary, MessageInfo, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, IdentityResponse, InstantiateMsg, MigrateMsg, QueryMsg, SudoMsg};
use crate::state::{IdentityRecord, IDENTITIES};

pub const CONTRACT_NAME: &str = "safetourx:identity_registry";
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
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::OptIn {} => execute_opt_in(deps, info),
        ExecuteMsg::CloseOut {} => execute_close_out(deps, info),
        ExecuteMsg::Register { id_hash } => execute_store(deps, info, "register", id_hash),
        ExecuteMsg::Update { id_hash } => execute_store(deps, info, "update", id_hash),
    }
}

pub fn execute_opt_in(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    if IDENTITIES.has(deps.storage, &info.sender) {
        return Err(ContractError::AlreadyOptedIn);
    }
    IDENTITIES.save(deps.storage, &info.sender, &IdentityRecord::default())?;
    Ok(Response::new()
        .add_attribute("action", "opt_in")
        .add_attribute("sender", info.sender))
}

pub fn execute_close_out(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    if !IDENTITIES.has(deps.storage, &info.sender) {
        return Err(ContractError::NotOptedIn);
    }
    IDENTITIES.remove(deps.storage, &info.sender);
    Ok(Response::new()
        .add_attribute("action", "close_out")
        .add_attribute("sender", info.sender))
}

/// `register` and `update` share semantics: overwrite the sender's hash.
pub fn execute_store(
    deps: DepsMut,
    info: MessageInfo,
    action: &str,
    id_hash: HexBinary,
) -> Result<Response, ContractError> {
    let mut record = IDENTITIES
        .may_load(deps.storage, &info.sender)?
        .ok_or(ContractError::NotOptedIn)?;
    record.id_hash = Some(id_hash);
    IDENTITIES.save(deps.storage, &info.sender, &record)?;
    Ok(Response::new()
        .add_attribute("action", action)
        .add_attribute("sender", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Identity { account } => {
            let record = IDENTITIES.may_load(deps.storage, &account)?;
            to_json_binary(&IdentityResponse {
                opted_in: record.is_some(),
                id_hash: record.and_then(|r| r.id_hash),
            })
        }
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

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(deps: DepsMut, _env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::ClearState { account } => {
            IDENTITIES.remove(deps.storage, &account);
            Ok(Response::new()
                .add_attribute("action", "clear_state")
                .add_attribute("account", account))
        }
        SudoMsg::Delete {} => Ok(Response::new().add_attribute("action", "delete")),
    }
}
