/// Implement [schemars::JsonSchema] methods by delegating to a parameter type
macro_rules! json_schema {
    ($parameters: ty, $is_referenceable: expr_2021) => {
        fn is_referenceable() -> bool {
            $is_referenceable
        }

        fn schema_name() -> String {
            <$parameters>::schema_name()
        }

        fn json_schema(r#gen: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
            <$parameters>::json_schema(r#gen)
        }
    };
}
