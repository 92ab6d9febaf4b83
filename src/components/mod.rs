pub mod force_graph;
pub mod tap_data;
