use crate::config::ClientConfig;

pub enum Command {
    /// Compile a serde-form filter (JSON) into the query-filter string.
    Compile { filter_json: String },
    /// Build a sort clause from `field[:asc|desc]` specs, in precedence order.
    Sort { fields: Vec<String> },
    /// Compile a serde-form update (JSON) into its target filter and update document.
    Update { update_json: String },
    /// Print the effective client configuration.
    ShowConfig { config: ClientConfig },
}
