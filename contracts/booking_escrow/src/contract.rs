#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Storage, Uint64,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::msg::{BookingResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SudoMsg};
use crate::state::{BookingRecord, BookingStatus, BOOKING};

pub const CONTRACT_NAME: &str = "safetourx:booking_escrow";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Blocks from `book` to the refund deadline. A refund is accepted only
/// once the height is past the deadline.
pub const REFUND_WINDOW: u64 = 1000;

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
        ExecuteMsg::Book { hotel_id, amount } => execute_book(deps, env, info, hotel_id, amount),
        ExecuteMsg::Checkin {} => execute_checkin(deps, info),
        ExecuteMsg::Refund {} => execute_refund(deps, env, info),
    }
}

pub fn execute_book(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    hotel_id: String,
    amount: Uint64,
) -> Result<Response, ContractError> {
    let deadline = Uint64::new(env.block.height)
        .checked_add(Uint64::new(REFUND_WINDOW))?
        .u64();
    let record = BookingRecord {
        hotel_id,
        amount,
        deadline,
        status: BookingStatus::Pending,
    };
    BOOKING.save(deps.storage, &record)?;

    Ok(Response::new()
        .add_attribute("action", "book")
        .add_attribute("sender", info.sender)
        .add_attribute("hotel_id", record.hotel_id)
        .add_attribute("amount", record.amount)
        .add_attribute("deadline", deadline.to_string()))
}

pub fn execute_checkin(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut record = load_pending(deps.storage)?;
    record.status = BookingStatus::Completed;
    BOOKING.save(deps.storage, &record)?;

    Ok(Response::new()
        .add_attribute("action", "checkin")
        .add_attribute("sender", info.sender))
}

pub fn execute_refund(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut record = load_pending(deps.storage)?;
    if env.block.height <= record.deadline {
        return Err(ContractError::RefundTooEarly {
            deadline: record.deadline,
            height: env.block.height,
        });
    }
    record.status = BookingStatus::Refunded;
    BOOKING.save(deps.storage, &record)?;

    Ok(Response::new()
        .add_attribute("action", "refund")
        .add_attribute("sender", info.sender))
}

/// The stored booking, if it may still move.
fn load_pending(storage: &dyn Storage) -> Result<BookingRecord, ContractError> {
    let record = BOOKING
        .may_load(storage)?
        .ok_or(ContractError::NoBooking)?;
    if record.status.is_terminal() {
        return Err(ContractError::NotPending {
            status: record.status,
        });
    }
    Ok(record)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Booking {} => to_json_binary(&BookingResponse {
            booking: BOOKING.may_load(deps.storage)?,
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

/// There is no per-account state to clear.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(_deps: DepsMut, _env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::ClearState { account } => Ok(Response::new()
            .add_attribute("action", "clear_state")
            .add_attribute("account", account)),
    }
}
