use crate::cli::parser::{Commands, OrgCommand};
use crate::config::Config;
use crate::core::calendar::CalendarLogic;
use crate::core::hierarchy::HierarchyIndex;
use crate::core::org::OrgLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{BLUE, CYAN, GREY, MAGENTA, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Org { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            OrgCommand::HeadOffice { name } => {
                let id = OrgLogic::add_head_office(&mut pool, name)?;
                success(format!("Head office #{id} '{}' created.", name.trim()));
            }
            OrgCommand::Franchise { head_office, name } => {
                let id = OrgLogic::add_franchise(&mut pool, *head_office, name)?;
                success(format!(
                    "Franchise #{id} '{}' created under head office #{head_office}.",
                    name.trim()
                ));
            }
            OrgCommand::Store {
                head_office,
                franchise,
                name,
            } => {
                let id = OrgLogic::add_store(&mut pool, *head_office, *franchise, name)?;
                match franchise {
                    Some(f) => success(format!(
                        "Store #{id} '{}' created under franchise #{f}.",
                        name.trim()
                    )),
                    None => success(format!(
                        "Store #{id} '{}' created under head office #{head_office}.",
                        name.trim()
                    )),
                }
            }
            OrgCommand::List => {
                let index = CalendarLogic::load_index(&pool.conn)?;
                print_tree(&index, &cfg.separator_char);
            }
        }
    }

    Ok(())
}

fn print_tree(index: &HierarchyIndex, sep: &str) {
    header("Organization", sep);

    let mut any = false;
    for ho in index.head_offices() {
        any = true;
        println!("{BLUE}HQ #{}{RESET} {}", ho.id, ho.name);

        for store in index.stores_of(ho.id, None) {
            println!("  {CYAN}STORE #{}{RESET} {}", store.id, store.name);
        }
        for fr in index.franchises_of(ho.id) {
            println!("  {MAGENTA}FRANCHISE #{}{RESET} {}", fr.id, fr.name);
            let mut stores = index.stores_of(ho.id, Some(fr.id)).peekable();
            if stores.peek().is_none() {
                println!("    {GREY}(no stores){RESET}");
            }
            for store in stores {
                println!("    {CYAN}STORE #{}{RESET} {}", store.id, store.name);
            }
        }
    }

    if !any {
        info("No head offices registered yet.");
    }
}
