//! Plans whose attribute map reaches a second table, executed with
//! caller-supplied joins.

#[cfg(test)]
mod tests {
    use rowfence_model::{PlanFilter, PlanOperand, PlanValue, QueryPlan};
    use rowfence_seaquery::{AttributeMap, JoinClause, TableColumn, plan_to_select};
    use sea_query::{Alias, Expr};

    use crate::{admitted_names, resource_attrs, seeded_connection};

    fn comparison_plan(operator: &str, attr: &str, value: impl Into<PlanValue>) -> QueryPlan {
        QueryPlan::from_filter(PlanFilter::conditional(PlanOperand::expression(
            operator,
            vec![PlanOperand::variable(attr), PlanOperand::value(value)],
        )))
    }

    fn principal_attrs() -> AttributeMap {
        resource_attrs()
            .with("request.principal.attr.role", TableColumn::new("user", "role"))
            .with(
                "request.principal.attr.department",
                TableColumn::new("user", "department"),
            )
    }

    fn join_on(join_column: &str) -> JoinClause {
        JoinClause::new(
            "user",
            Expr::col((Alias::new("user"), Alias::new("id")))
                .equals((Alias::new("resource"), Alias::new(join_column))),
        )
    }

    #[test]
    fn test_should_filter_on_owner_role_through_join() {
        let plan = comparison_plan("eq", "request.principal.attr.role", "admin");
        let query = plan_to_select(
            &plan,
            "resource",
            &principal_attrs(),
            None,
            &[join_on("ownedBy")],
        )
        .unwrap();
        let conn = seeded_connection();
        assert_eq!(admitted_names(&conn, &query), ["resource1", "resource2"]);
    }

    #[test]
    fn test_should_filter_on_creator_department_through_join() {
        let plan = comparison_plan("eq", "request.principal.attr.department", "marketing");
        let query = plan_to_select(
            &plan,
            "resource",
            &principal_attrs(),
            None,
            &[join_on("createdBy")],
        )
        .unwrap();
        let conn = seeded_connection();
        assert_eq!(admitted_names(&conn, &query), ["resource2", "resource3"]);
    }

    #[test]
    fn test_should_combine_joined_and_local_predicates() {
        let plan = QueryPlan::from_filter(PlanFilter::conditional(PlanOperand::expression(
            "and",
            vec![
                PlanOperand::expression(
                    "eq",
                    vec![
                        PlanOperand::variable("request.principal.attr.role"),
                        PlanOperand::value("admin"),
                    ],
                ),
                PlanOperand::expression(
                    "gt",
                    vec![
                        PlanOperand::variable("request.resource.attr.aNumber"),
                        PlanOperand::value(1_i64),
                    ],
                ),
            ],
        )));
        let query = plan_to_select(
            &plan,
            "resource",
            &principal_attrs(),
            None,
            &[join_on("ownedBy")],
        )
        .unwrap();
        let conn = seeded_connection();
        assert_eq!(admitted_names(&conn, &query), ["resource2"]);
    }

    #[test]
    fn test_should_fail_when_join_specification_is_missing() {
        let plan = comparison_plan("eq", "request.principal.attr.role", "admin");
        let err = plan_to_select(&plan, "resource", &principal_attrs(), None, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Join specification missing for table(s): 'user'"
        );
    }

    #[test]
    fn test_should_not_require_joins_for_short_circuit_plans() {
        let plan = QueryPlan::from_filter(PlanFilter::always_allowed());
        let query = plan_to_select(&plan, "resource", &principal_attrs(), None, &[]).unwrap();
        let conn = seeded_connection();
        assert_eq!(
            admitted_names(&conn, &query),
            ["resource1", "resource2", "resource3"]
        );
    }
}
