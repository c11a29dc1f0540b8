/// Detail Module
///
/// Pure mappers from one fetched record to the ordered items of its detail
/// panel. Absent record fields never fail a mapping; they render empty.
use crate::config::ChainSetting;
use crate::format::{display_value, format_number, to_precision};
use crate::models::{Account, Block, Event, Extrinsic, Indexer};
use crate::route::{block_href, call_href, extrinsic_href};
use crate::views::field::{DetailItems, Field, Link};

/// Block height label with thousand separators, empty when absent
pub fn height_label(height: Option<u64>) -> String {
    height.map(format_number).unwrap_or_default()
}

/// `1,234-5` style label for a composite id
pub fn composite_label(height: Option<u64>, index: Option<u32>) -> String {
    format!("{}-{}", height_label(height), index.map(|i| i.to_string()).unwrap_or_default())
}

pub fn block_link(height: Option<u64>) -> Field {
    Field::Link(Link::new(block_href(height), height_label(height)))
}

fn extrinsic_link(height: Option<u64>, index: Option<u32>) -> Field {
    Field::Link(Link::new(extrinsic_href(height, index), composite_label(height, index)))
}

fn call_link(height: Option<u64>, index: Option<u32>) -> Field {
    Field::Link(Link::new(call_href(height, index), composite_label(height, index)))
}

fn copyable(text: Option<&String>) -> Field {
    Field::Copyable { text: text.cloned(), to: None }
}

pub fn to_block_detail_item(block: &Block) -> DetailItems {
    // The parent link target comes from the height; parentHash is only the label.
    let parent_route = block.height.and_then(|height| height.checked_sub(1)).map(|parent| block_href(Some(parent)));

    DetailItems::new()
        .with("Block Time", Field::Time(block.time))
        .with("Status", Field::Finalized(block.is_finalized))
        .with("Hash", copyable(block.hash.as_ref()))
        .with("Parent Hash", Field::Copyable { text: block.parent_hash.clone(), to: parent_route })
        .with("State Root", copyable(block.state_root.as_ref()))
        .with("Extrinsics Root", copyable(block.extrinsics_root.as_ref()))
        .with("Validator", Field::Address(block.validator.clone()))
}

/// Balance cell: tooltip with full precision, display value abbreviated
fn balance(tooltip_amount: Option<u128>, display_amount: Option<u128>, chain: &ChainSetting) -> Field {
    let tooltip = tooltip_amount.map(|amount| format!("{} {}", to_precision(amount, chain.decimals), chain.symbol));
    let display = display_amount
        .map(|amount| format!("{} {}", display_value(&to_precision(amount, chain.decimals)), chain.symbol));

    Field::Balance { tooltip, display }
}

pub fn to_account_detail_item(id: &str, account: Option<&Account>, chain: &ChainSetting) -> DetailItems {
    let data = account.and_then(|account| account.data.clone()).unwrap_or_default();

    DetailItems::new()
        .with("Address", Field::Address(Some(id.to_string())))
        .with("Total Balance", balance(data.total, data.total, chain))
        .with("Free", balance(data.free, data.free, chain))
        // Labelled "Reversed" but displays `reserved`; only the tooltip reads `reversed`.
        .with("Reversed", balance(data.reversed, data.reserved, chain))
        .with("Nonce", Field::Text(account.and_then(|account| account.nonce).map(|nonce| nonce.to_string())))
}

pub fn to_call_detail_item(indexer: Option<&Indexer>, section: Option<&str>, method: Option<&str>) -> DetailItems {
    let indexer = indexer.cloned().unwrap_or_default();
    let call_text = format!("{}({})", section.unwrap_or_default(), method.unwrap_or_default());

    DetailItems::new()
        .with("Call ID", call_link(indexer.block_height, indexer.call_index))
        .with("Extrinsics ID", extrinsic_link(indexer.block_height, indexer.extrinsic_index))
        .with("Block", block_link(indexer.block_height))
        .with("Timestamp", Field::Time(indexer.block_time))
        .with("Method", Field::Tag(method.map(str::to_string)))
        .with("Call", Field::text(call_text))
}

pub fn to_event_detail_item(event: &Event) -> DetailItems {
    let indexer = event.indexer();

    DetailItems::new()
        .with("Event Time", Field::Time(indexer.block_time))
        .with("Block", block_link(indexer.block_height))
        .with("Extrinsic ID", extrinsic_link(indexer.block_height, indexer.extrinsic_index))
        .with("Event Index", Field::Text(indexer.event_index.map(|i| i.to_string())))
        .with("Module", Field::HighContrastTag(event.section.clone()))
        .with("Event Name", Field::Tag(event.method.clone()))
}

pub fn to_extrinsic_detail_item(extrinsic: &Extrinsic) -> DetailItems {
    let indexer = extrinsic.indexer();
    let call = extrinsic.call.clone().unwrap_or_default();

    let life_time = extrinsic.lifetime.map(|[birth, death]| {
        Field::LinkRange(
            Link::new(block_href(Some(birth)), format_number(birth)),
            Link::new(block_href(Some(death)), format_number(death)),
        )
    });
    let signer = (extrinsic.is_signed == Some(true)).then(|| Field::Address(extrinsic.signer.clone()));
    let nonce = extrinsic.nonce.filter(|nonce| *nonce != 0).map(|nonce| Field::text(nonce.to_string()));
    let tip = extrinsic.tip.filter(|tip| *tip > 0).map(|tip| Field::text(tip.to_string()));

    DetailItems::new()
        .with("Extrinsic Time", Field::Time(indexer.block_time))
        .with("Block", block_link(indexer.block_height))
        .with_optional("Life Time", life_time)
        .with("Extrinsic Hash", copyable(extrinsic.hash.as_ref()))
        .with("Module", Field::HighContrastTag(call.section))
        .with("Call", Field::Tag(call.method))
        .with_optional("Singer", signer)
        .with_optional("Nonce", nonce)
        .with_optional("Tip", tip)
        .with("Result", Field::ResultIcon(extrinsic.is_finalized))
}
