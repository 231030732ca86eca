pub mod cli;
pub mod config;
pub mod data_loader;
pub mod ingredient_line;
pub mod nutrition_resolver;
pub mod nutritional_matcher;
pub mod recipe_aggregator;
pub mod recipe_editor;
pub mod recipe_file;
pub mod reference_data;
pub mod unit_converter;
pub mod validation;
