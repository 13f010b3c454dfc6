pub mod choice;
pub mod config;
pub mod data_handling;
pub mod department;
pub mod gateway;
pub mod ids;
pub mod logging;
pub mod personnel;
pub mod role;
pub mod table;
pub mod textinterface;
