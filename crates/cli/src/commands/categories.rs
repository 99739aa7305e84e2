use crate::commands::{load_service, CommandResult};

pub fn run() -> CommandResult {
    let service = match load_service("categories") {
        Ok(service) => service,
        Err(result) => return result,
    };

    let categories = service.get_all_categories();
    CommandResult::success_with_data(
        "categories",
        format!("{} distinct categor{}", categories.len(), plural_y(categories.len())),
        &categories,
    )
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}
