pub mod backend;

pub use backend::SupabaseAdapter;
