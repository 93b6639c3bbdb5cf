mod external;

pub use external::edit_workflow;
