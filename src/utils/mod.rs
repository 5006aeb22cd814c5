pub mod graphql_string;
