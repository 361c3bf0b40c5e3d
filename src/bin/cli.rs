use chrono::{Datelike, Local, NaiveDate};
use content_calendar::{
    ContentPost, DayCell, PostDraft, PostPatch, PostType, TypeFilter, advance_month, first_of_month,
    load_posts_from_csv, load_posts_from_json, month_grid, sample_posts, save_posts_to_csv,
    save_posts_to_json,
};
#[cfg(feature = "sqlite")]
use content_calendar::{PostStore, SqlitePostStore};
use content_calendar::{create_post, delete_post, update_post};
use std::io::{self, Write};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut push_row = |out: &mut String, cells: &[String]| {
        out.push('|');
        for (ci, cell) in cells.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            let pad = widths[ci].saturating_sub(cell.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header_cells);
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        push_row(&mut out, row);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}

fn render_month(cells: &[DayCell], reference: NaiveDate) -> String {
    let title = format!(
        "{} {}",
        MONTH_NAMES[reference.month0() as usize],
        reference.year()
    );
    let rows: Vec<Vec<String>> = cells
        .iter()
        .filter(|cell| !cell.posts.is_empty() || cell.today)
        .map(|cell| {
            let ids = cell
                .posts
                .iter()
                .map(|p| p.id.clone())
                .collect::<Vec<_>>()
                .join(",");
            vec![
                cell.date.to_string(),
                if cell.today { "*".into() } else { String::new() },
                cell.posts.len().to_string(),
                ids,
            ]
        })
        .collect();
    if rows.is_empty() {
        return format!("{title}: no posts scheduled this month\n");
    }
    format!(
        "{title}\n{}",
        render_text_table(&["date", "today", "posts", "ids"], &rows)
    )
}

fn render_posts(posts: &[ContentPost]) -> String {
    let rows: Vec<Vec<String>> = posts
        .iter()
        .map(|post| {
            vec![
                post.id.clone(),
                post.date.to_string(),
                post.time.clone(),
                post.post_type.as_str().to_string(),
                truncate(&post.content, 48),
            ]
        })
        .collect();
    render_text_table(&["id", "date", "time", "type", "content"], &rows)
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the current month grid\n  posts                              List posts under the active filters\n  next | prev                        Navigate one month forward/back\n  month <YYYY-MM>                    Jump to a month\n  filter <all|text|image|link>       Set the type filter\n  search [text...]                   Set the content search (no text clears)\n  add <YYYY-MM-DD> <HH:MM> <type> <content...>\n                                     Schedule a new post\n  edit <id> <date|time|type|content> <value...>\n                                     Update one field of a post\n  delete <id>                        Delete a post\n  seed                               Load the demo posts\n  save <json|csv> <path>             Persist posts to disk\n  load <json|csv> <path>             Load posts from disk{}\n  quit|exit                          Exit",
        if cfg!(feature = "sqlite") {
            "\n  save sqlite <path>                 Persist posts to a SQLite database\n  load sqlite <path>                 Load posts from a SQLite database"
        } else {
            ""
        }
    );
}

fn parse_month(input: &str) -> Option<NaiveDate> {
    let (year, month) = input.split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn main() {
    let today = Local::now().date_naive();
    let mut posts: Vec<ContentPost> = Vec::new();
    let mut reference = first_of_month(today);
    let mut filter = TypeFilter::All;
    let mut search = String::new();

    println!("Content Calendar (CLI) - type 'help' for commands\n");
    println!(
        "{}",
        render_month(&month_grid(reference, today, &posts, filter, &search), reference)
    );

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => {
                let cells = month_grid(reference, today, &posts, filter, &search);
                println!("{}", render_month(&cells, reference));
            }
            "posts" => {
                let listed = content_calendar::filter_posts(&posts, filter, &search);
                println!("{}", render_posts(&listed));
            }
            "next" => {
                reference = advance_month(reference, 1);
                let cells = month_grid(reference, today, &posts, filter, &search);
                println!("{}", render_month(&cells, reference));
            }
            "prev" => {
                reference = advance_month(reference, -1);
                let cells = month_grid(reference, today, &posts, filter, &search);
                println!("{}", render_month(&cells, reference));
            }
            "month" => match parts.next().and_then(parse_month) {
                Some(month) => {
                    reference = month;
                    let cells = month_grid(reference, today, &posts, filter, &search);
                    println!("{}", render_month(&cells, reference));
                }
                None => println!("Usage: month <YYYY-MM>"),
            },
            "filter" => match parts.next().and_then(TypeFilter::from_str) {
                Some(new_filter) => {
                    filter = new_filter;
                    println!("Filter set.");
                }
                None => println!("Usage: filter <all|text|image|link>"),
            },
            "search" => {
                search = parts.collect::<Vec<_>>().join(" ");
                if search.is_empty() {
                    println!("Search cleared.");
                } else {
                    println!("Searching for '{search}'.");
                }
            }
            "add" => {
                let date_s = parts.next();
                let time_s = parts.next();
                let type_s = parts.next();
                let content = parts.collect::<Vec<_>>().join(" ");
                match (date_s, time_s, type_s.and_then(PostType::from_str)) {
                    (Some(date_s), Some(time_s), Some(post_type)) => {
                        let draft = PostDraft {
                            post_type,
                            content,
                            date: date_s.to_string(),
                            time: time_s.to_string(),
                        };
                        match create_post(&posts, &draft) {
                            Ok((updated, created)) => {
                                posts = updated;
                                println!("Scheduled post {} on {}.", created.id, created.date);
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: add <YYYY-MM-DD> <HH:MM> <type> <content...>"),
                }
            }
            "edit" => {
                let id_s = parts.next();
                let field_s = parts.next();
                let value = parts.collect::<Vec<_>>().join(" ");
                match (id_s, field_s) {
                    (Some(id), Some(field)) => {
                        let mut patch = PostPatch::default();
                        match field {
                            "date" => patch.date = Some(value),
                            "time" => patch.time = Some(value),
                            "content" => patch.content = Some(value),
                            "type" => match PostType::from_str(value.trim()) {
                                Some(post_type) => patch.post_type = Some(post_type),
                                None => {
                                    println!("Unknown type '{}'.", value.trim());
                                    continue;
                                }
                            },
                            other => {
                                println!("Unknown field '{other}'.");
                                continue;
                            }
                        }
                        match update_post(&posts, id, &patch) {
                            Ok(updated) => {
                                posts = updated;
                                println!("Updated post {id}.");
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: edit <id> <date|time|type|content> <value...>"),
                }
            }
            "delete" => match parts.next() {
                Some(id) => match delete_post(&posts, id) {
                    Ok(updated) => {
                        posts = updated;
                        println!("Deleted post {id}.");
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: delete <id>"),
            },
            "seed" => {
                posts = sample_posts();
                reference = first_of_month(posts[0].date);
                println!("Loaded {} demo posts.", posts.len());
                let cells = month_grid(reference, today, &posts, filter, &search);
                println!("{}", render_month(&cells, reference));
            }
            "save" => {
                let format_s = parts.next();
                let path_s = parts.next();
                match (format_s, path_s) {
                    (Some("json"), Some(path)) => match save_posts_to_json(&posts, path) {
                        Ok(()) => println!("Posts saved to {path}."),
                        Err(e) => println!("Error: {}", e),
                    },
                    (Some("csv"), Some(path)) => match save_posts_to_csv(&posts, path) {
                        Ok(()) => println!("Posts saved to {path}."),
                        Err(e) => println!("Error: {}", e),
                    },
                    #[cfg(feature = "sqlite")]
                    (Some("sqlite"), Some(path)) => {
                        match SqlitePostStore::new(path).and_then(|store| store.save_posts(&posts))
                        {
                            Ok(()) => println!("Posts saved to {path}."),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: save <json|csv|sqlite> <path>"),
                }
            }
            "load" => {
                let format_s = parts.next();
                let path_s = parts.next();
                let loaded = match (format_s, path_s) {
                    (Some("json"), Some(path)) => Some((load_posts_from_json(path), path)),
                    (Some("csv"), Some(path)) => Some((load_posts_from_csv(path), path)),
                    #[cfg(feature = "sqlite")]
                    (Some("sqlite"), Some(path)) => {
                        Some((SqlitePostStore::new(path).and_then(|s| s.load_posts()), path))
                    }
                    _ => {
                        println!("Usage: load <json|csv|sqlite> <path>");
                        None
                    }
                };
                if let Some((result, path)) = loaded {
                    match result {
                        Ok(new_posts) => {
                            posts = new_posts;
                            println!("Posts loaded from {path}.");
                            println!(
                                "{}",
                                render_posts(&content_calendar::filter_posts(
                                    &posts, filter, &search
                                ))
                            );
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                }
            }
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
    }
}
