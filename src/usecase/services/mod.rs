pub mod sheet_service;
