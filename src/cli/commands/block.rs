use crate::cli::commands::open_pool;
use crate::cli::parser::{BlockCmd, BlockFields, ItemCmd, ItemFields};
use crate::config::Config;
use crate::core::block::{BlockInput, BlockLogic, EndChange, ItemInput};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::Directory;
use crate::models::{Block, BlockType};
use crate::ui::messages::{header, success};
use crate::utils::formatting::time_or_placeholder;
use crate::utils::table::{Column, Table};
use crate::utils::time::{normalize_optional_time, normalize_time};

fn parse_block_type(s: &str) -> AppResult<BlockType> {
    BlockType::from_code(s).ok_or_else(|| AppError::InvalidBlockType(s.to_string()))
}

/// Validates CLI fields into a `BlockInput`. `default_type` applies to new
/// blocks only.
fn to_input(f: &BlockFields, default_type: Option<&str>, auto_end: bool) -> AppResult<BlockInput> {
    let block_type = match (&f.block_type, default_type) {
        (Some(t), _) => Some(parse_block_type(t)?),
        (None, Some(d)) => Some(parse_block_type(d)?),
        (None, None) => None,
    };

    let end = match (&f.end, auto_end) {
        (Some(e), _) => EndChange::Fixed(normalize_time(e)?),
        (None, true) => EndChange::Auto,
        (None, false) => EndChange::Keep,
    };

    Ok(BlockInput {
        block_type,
        title: f.title.clone(),
        description: f.description.clone(),
        start_time: normalize_optional_time(f.start.as_ref())?,
        end,
        location_id: f.location.clone(),
        participants: f.participants.clone(),
        advance: f.advance.clone(),
        met_by: f.met_by.clone(),
        attachments: f.attachments.clone(),
        notes: f.notes.clone(),
    })
}

fn to_item_input(f: &ItemFields) -> AppResult<ItemInput> {
    Ok(ItemInput {
        time: normalize_optional_time(f.time.as_ref())?,
        description: f.description.clone(),
        staff_instructions: f.staff_instructions.clone(),
        guest_instructions: f.guest_instructions.clone(),
        notes: f.notes.clone(),
    })
}

pub fn handle(cmd: &BlockCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        BlockCmd::Add { day, fields } => {
            let input = to_input(fields, Some(&cfg.default_block_type), false)?;
            let block = BlockLogic::add(&mut pool, day, input)?;
            success(format!("Block '{}' added: {}", block.title, block.id));
        }

        BlockCmd::Edit {
            id,
            fields,
            auto_end,
        } => {
            let block = BlockLogic::edit(&mut pool, id, to_input(fields, None, *auto_end)?)?;
            success(format!(
                "Block '{}' updated (ends {})",
                block.title,
                time_or_placeholder(block.effective_end_time())
            ));
        }

        BlockCmd::Show { id } => {
            let (day_id, block) = BlockLogic::get(&pool, id)?;
            let dir = Directory::load(&pool.conn)?;
            print_block(&day_id, &block, &dir, cfg);
        }

        BlockCmd::Del { id } => {
            let block = BlockLogic::delete(&mut pool, id)?;
            success(format!("Block '{}' deleted", block.title));
        }

        BlockCmd::Item(item) => handle_item(item, &mut pool)?,
    }

    Ok(())
}

fn handle_item(cmd: &ItemCmd, pool: &mut DbPool) -> AppResult<()> {
    match cmd {
        ItemCmd::Add { block, fields } => {
            let item = BlockLogic::add_item(pool, block, to_item_input(fields)?)?;
            success(format!("Schedule item {} added: {}", item.time, item.id));
        }
        ItemCmd::Edit { id, fields } => {
            let item = BlockLogic::edit_item(pool, id, to_item_input(fields)?)?;
            success(format!("Schedule item {} updated", item.time));
        }
        ItemCmd::Del { id } => {
            let item = BlockLogic::delete_item(pool, id)?;
            success(format!("Schedule item {} deleted", item.time));
        }
    }
    Ok(())
}

fn print_block(day_id: &str, b: &Block, dir: &Directory, cfg: &Config) {
    header(format!("{} ({})", b.title, b.block_type.as_str()));

    let mode = if b.end_time_fixed { "fixed" } else { "auto" };
    println!("ID        : {}", b.id);
    println!("Day       : {}", day_id);
    println!(
        "Time      : {} → {} ({})",
        b.start_time,
        time_or_placeholder(b.effective_end_time()),
        mode
    );
    if let Some(loc) = &b.location_id {
        println!("Location  : {}", dir.location(loc));
    }
    if let Some(d) = &b.description {
        println!("About     : {}", d);
    }
    if !b.participants_ids.is_empty() {
        println!("People    : {}", dir.people(&b.participants_ids));
    }
    if !b.advance_participant_ids.is_empty() {
        println!("Advance   : {}", dir.people(&b.advance_participant_ids));
    }
    if !b.met_by_participant_ids.is_empty() {
        println!("Met by    : {}", dir.people(&b.met_by_participant_ids));
    }
    for a in &b.attachments {
        println!("Attachment: {}", a);
    }
    if let Some(n) = &b.notes {
        println!("Notes     : {}", n);
    }

    let items = b.sorted_schedule();
    if items.is_empty() {
        return;
    }

    println!();
    let mut table = Table::new(vec![
        Column::new("Time", 5),
        Column::new("What", 30),
        Column::new("Staff", 30),
        Column::new("Guests", 30),
        Column::new("ID", 36),
    ])
    .with_separator(&cfg.separator_char);

    for i in items {
        table.add_row(vec![
            i.time.clone(),
            i.description.clone(),
            i.staff_instructions.clone().unwrap_or_default(),
            i.guest_instructions.clone().unwrap_or_default(),
            i.id.clone(),
        ]);
    }
    print!("{}", table.render());
}
