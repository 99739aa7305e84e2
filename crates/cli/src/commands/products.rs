use crate::commands::{load_service, CommandResult};

pub fn run(category: Option<&str>) -> CommandResult {
    let service = match load_service("products") {
        Ok(service) => service,
        Err(result) => return result,
    };

    match category {
        Some(category) => {
            let products = service.get_products_by_category(category);
            CommandResult::success_with_data(
                "products",
                format!("{} product(s) in category `{category}`", products.len()),
                &products,
            )
        }
        None => {
            let products = service.get_all_products();
            CommandResult::success_with_data(
                "products",
                format!("{} product(s) in catalog", products.len()),
                &products,
            )
        }
    }
}
