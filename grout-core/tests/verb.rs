#[cfg(test)]
mod tests {
    use grout_core::{Template, Verb};

    #[test]
    fn ddl_forms_win_over_the_generic_create() {
        assert_eq!(Verb::classify("CREATE INDEX idx FOR (n:User) ON (n.id)"), Verb::Ddl);
        assert_eq!(Verb::classify("DROP INDEX idx IF EXISTS"), Verb::Ddl);
        assert_eq!(
            Verb::classify("CREATE CONSTRAINT c FOR (n:User) REQUIRE n.id IS UNIQUE"),
            Verb::Ddl
        );
        assert_eq!(Verb::classify("DROP CONSTRAINT c IF EXISTS"), Verb::Ddl);
    }

    #[test]
    fn statement_verbs() {
        assert_eq!(Verb::classify("CREATE (n:User {id: '#id'})"), Verb::Create);
        assert_eq!(Verb::classify("MATCH (n) RETURN n"), Verb::Match);
        assert_eq!(Verb::classify("MATCH (n) SET n.a = '#a' RETURN n"), Verb::Set);
        assert_eq!(Verb::classify("MATCH (n) DELETE n"), Verb::Delete);
        assert_eq!(Verb::classify("MATCH (n) REMOVE n.a RETURN n"), Verb::Delete);
        assert_eq!(Verb::classify("RETURN 1"), Verb::Unknown);
    }

    #[test]
    fn classification_ignores_case_and_leading_spaces() {
        assert_eq!(Verb::classify("  create index idx FOR (n:User) ON (n.id)"), Verb::Ddl);
        assert_eq!(Verb::classify("match (n) return n"), Verb::Match);
    }

    #[test]
    fn embedded_words_are_not_keywords() {
        assert_eq!(Verb::classify("RETURN n.settings"), Verb::Unknown);
        assert_eq!(Verb::classify("MATCH (n:Undeleted) RETURN n"), Verb::Match);
    }

    #[test]
    fn templates_carry_their_verb() {
        let template = Template::parse("MATCH (n) WHERE n.a = '#a' DELETE n");
        assert_eq!(template.verb(), Verb::Delete);
    }
}
