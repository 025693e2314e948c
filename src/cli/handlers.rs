use std::io::Write;
use std::path::Path;

use chrono::Utc;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::lock::StoreLock;
use crate::io::state::write_session_state;
use crate::io::store_io::{load_workspace, save_lists, save_tasks};
use crate::model::music::{parse_music_filter, MusicItem};
use crate::model::task::parse_task_filter;
use crate::ops::music_ops::{self, MusicError};
use crate::ops::search;
use crate::ops::share::{self, ShareError, SHARE_PREFIX};
use crate::ops::task_ops;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = config_io::load_config();
    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref(), &config);
    let auto_confirm = config.import.auto_confirm;

    match cli.command {
        Commands::Task(cmd) => match cmd.action {
            TaskAction::Add(args) => cmd_task_add(&data_dir, args),
            TaskAction::List(args) => cmd_task_list(&data_dir, args, json),
            TaskAction::Toggle(args) => cmd_task_toggle(&data_dir, args),
            TaskAction::Edit(args) => cmd_task_edit(&data_dir, args),
            TaskAction::Rm(args) => cmd_task_rm(&data_dir, args),
            TaskAction::Clear => cmd_task_clear(&data_dir, json),
            TaskAction::Search(args) => cmd_task_search(&data_dir, args, json),
        },
        Commands::Music(cmd) => match cmd.action {
            MusicAction::Add(args) => cmd_music_add(&data_dir, args),
            MusicAction::List(args) => cmd_music_list(&data_dir, args, json),
            MusicAction::Fav(args) => cmd_music_fav(&data_dir, args),
            MusicAction::Edit(args) => cmd_music_edit(&data_dir, args),
            MusicAction::Rm(args) => cmd_music_rm(&data_dir, args),
            MusicAction::Clear => cmd_music_clear(&data_dir, json),
            MusicAction::Search(args) => cmd_music_search(&data_dir, args, json),
        },
        Commands::List(cmd) => match cmd.action {
            ListAction::New(args) => cmd_list_new(&data_dir, args),
            ListAction::Rm(args) => cmd_list_rm(&data_dir, args),
            ListAction::Use(args) => cmd_list_use(&data_dir, args),
            ListAction::Show => cmd_list_show(&data_dir, json),
        },
        Commands::Share => cmd_share(&data_dir, json),
        Commands::Import(args) => cmd_import(&data_dir, args, auto_confirm, json),
    }
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_task_add(data_dir: &Path, args: TaskAddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    let id = task_ops::add_task(&mut ws.tasks, &args.text, Utc::now())?;
    save_tasks(&ws)?;
    println!("{}", id);
    Ok(())
}

fn cmd_task_list(
    data_dir: &Path,
    args: TaskListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace(data_dir)?;
    let filter = parse_task_filter(&args.filter)?;
    let view = task_ops::filter_tasks(&ws.tasks, filter);

    if json {
        let out = TaskListJson {
            filter: &args.filter,
            count: view.len(),
            tasks: view,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for task in view {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_task_toggle(data_dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    task_ops::toggle_task(&mut ws.tasks, &args.id)?;
    save_tasks(&ws)?;
    let task = ws.tasks.iter().find(|t| t.id == args.id);
    if let Some(task) = task {
        println!("{}", format_task_line(task));
    }
    Ok(())
}

fn cmd_task_edit(data_dir: &Path, args: TaskEditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    task_ops::edit_task(&mut ws.tasks, &args.id, &args.text)?;
    save_tasks(&ws)?;
    Ok(())
}

fn cmd_task_rm(data_dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    task_ops::delete_task(&mut ws.tasks, &args.id)?;
    save_tasks(&ws)?;
    Ok(())
}

fn cmd_task_clear(data_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    let removed = task_ops::clear_completed(&mut ws.tasks);
    save_tasks(&ws)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&ClearedJson { removed })?);
    } else {
        println!("removed {} completed task(s)", removed);
    }
    Ok(())
}

fn cmd_task_search(
    data_dir: &Path,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace(data_dir)?;
    let re = regex::Regex::new(&args.pattern)?;
    let hits = search::search_tasks(&ws.tasks, &re);

    if json {
        let out = TaskListJson {
            filter: "search",
            count: hits.len(),
            tasks: hits,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for task in hits {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Music commands
// ---------------------------------------------------------------------------

fn cmd_music_add(data_dir: &Path, args: MusicAddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    let cover = args.cover.unwrap_or_default();
    let id = music_ops::add_music(
        ws.current_list_mut(),
        &args.title,
        &args.artist,
        &cover,
        Utc::now(),
    )?;
    save_lists(&ws)?;
    println!("{}", id);
    Ok(())
}

fn cmd_music_list(
    data_dir: &Path,
    args: MusicListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace(data_dir)?;
    let filter = parse_music_filter(&args.filter)?;
    let list = ws.current_list();
    let view = music_ops::filter_musics(&list.musics, filter);

    if json {
        let out = MusicViewJson {
            list: &list.id,
            name: &list.name,
            filter: &args.filter,
            count: view.len(),
            musics: view,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("== {} ({}) ==", list.name, list.id);
        for music in view {
            println!("{}", format_music_line(music));
        }
    }
    Ok(())
}

fn cmd_music_fav(data_dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    music_ops::toggle_favorite(ws.current_list_mut(), &args.id)?;
    save_lists(&ws)?;
    let list = ws.current_list();
    if let Some(music) = list.musics.iter().find(|m| m.id == args.id) {
        println!("{}", format_music_line(music));
    }
    Ok(())
}

fn cmd_music_edit(data_dir: &Path, args: MusicEditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    // Fill in unspecified fields from the current values; the reducer always
    // replaces all three at once.
    let (title, artist, cover) = {
        let list = ws.current_list();
        let existing = list
            .musics
            .iter()
            .find(|m| m.id == args.id)
            .ok_or_else(|| MusicError::NotFound(args.id.clone()))?;
        (
            args.title.unwrap_or_else(|| existing.title.clone()),
            args.artist.unwrap_or_else(|| existing.artist.clone()),
            args.cover.unwrap_or_else(|| existing.cover_url.clone()),
        )
    };

    music_ops::edit_music(ws.current_list_mut(), &args.id, &title, &artist, &cover)?;
    save_lists(&ws)?;
    Ok(())
}

fn cmd_music_rm(data_dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    music_ops::delete_music(ws.current_list_mut(), &args.id)?;
    save_lists(&ws)?;
    Ok(())
}

fn cmd_music_clear(data_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    let removed = music_ops::clear_non_favorites(ws.current_list_mut());
    save_lists(&ws)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&ClearedJson { removed })?);
    } else {
        println!("removed {} non-favorite song(s)", removed);
    }
    Ok(())
}

fn cmd_music_search(
    data_dir: &Path,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace(data_dir)?;
    let re = regex::Regex::new(&args.pattern)?;
    let list = ws.current_list();
    let hits = search::search_musics(&list.musics, &re);

    if json {
        let musics: Vec<&MusicItem> = hits.iter().map(|h| h.music).collect();
        let out = MusicViewJson {
            list: &list.id,
            name: &list.name,
            filter: "search",
            count: musics.len(),
            musics,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for hit in &hits {
            println!("{}", format_music_hit(hit));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// List management
// ---------------------------------------------------------------------------

fn cmd_list_new(data_dir: &Path, args: ListNewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    let id = music_ops::create_list(&mut ws.lists, &args.name, Utc::now())?;
    ws.state.current_list = id.clone();
    save_lists(&ws)?;
    write_session_state(data_dir, &ws.state)?;
    println!("{}", id);
    Ok(())
}

fn cmd_list_rm(data_dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    music_ops::delete_list(&mut ws.lists, &args.id)?;
    ws.fix_selection();
    save_lists(&ws)?;
    write_session_state(data_dir, &ws.state)?;
    Ok(())
}

fn cmd_list_use(data_dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    if music_ops::find_list(&ws.lists, &args.id).is_none() {
        return Err(MusicError::ListNotFound(args.id).into());
    }
    ws.state.current_list = args.id;
    write_session_state(data_dir, &ws.state)?;
    Ok(())
}

fn cmd_list_show(data_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace(data_dir)?;

    if json {
        let out: Vec<ListInfoJson> = ws
            .lists
            .iter()
            .map(|l| ListInfoJson {
                id: &l.id,
                name: &l.name,
                selected: l.id == ws.state.current_list,
                songs: l.musics.len(),
                favorites: l.musics.iter().filter(|m| m.is_favorite).count(),
                shared: l.is_shared,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for list in &ws.lists {
            println!(
                "{}",
                format_list_line(list, list.id == ws.state.current_list)
            );
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Share / import
// ---------------------------------------------------------------------------

fn cmd_share(data_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    let code = share::encode_share(ws.current_list(), Utc::now());
    ws.current_list_mut().is_shared = true;
    save_lists(&ws)?;

    let list = ws.current_list();
    if json {
        let out = ShareJson {
            list: &list.name,
            songs: list.musics.len(),
            code: &code,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", code);
    }
    Ok(())
}

fn cmd_import(
    data_dir: &Path,
    args: ImportArgs,
    auto_confirm: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = load_workspace(data_dir)?;
    let _lock = StoreLock::acquire_default(data_dir)?;

    // Tagged share codes first; anything else gets one chance as a legacy
    // share URL carrying a locally-known list id.
    let (source_name, incoming) = if args.code.trim().starts_with(SHARE_PREFIX) {
        let record = share::decode_share(&args.code)?;
        (record.name, record.musics)
    } else if let Some(list_id) = share::parse_legacy_list_id(&args.code) {
        let list = music_ops::find_list(&ws.lists, &list_id)
            .ok_or(ShareError::UnknownList(list_id))?;
        (list.name.clone(), list.musics.clone())
    } else {
        return Err(ShareError::InvalidCode.into());
    };

    let plan = share::plan_import(incoming, &ws.current_list().musics);
    if plan.has_duplicates() && !args.yes && !auto_confirm {
        eprint!(
            "{} song(s) from the code already exist in '{}'. Import the rest? [y/n] ",
            plan.duplicates,
            ws.current_list().name
        );
        std::io::stderr().flush()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("cancelled");
            return Ok(());
        }
    }

    let duplicates = plan.duplicates;
    let imported = share::apply_import(ws.current_list_mut(), plan.fresh, Utc::now());
    save_lists(&ws)?;

    let list = ws.current_list();
    if json {
        let out = ImportJson {
            list: &list.name,
            from: &source_name,
            imported,
            duplicates_dropped: duplicates,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "imported {} song(s) into '{}' ({} duplicate(s) dropped)",
            imported, list.name, duplicates
        );
    }
    Ok(())
}
