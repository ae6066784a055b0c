//! PHP source parser for extracting class declarations.
//!
//! Sources are parsed with tree-sitter's PHP grammar. The syntax tree is
//! walked for `class` declarations together with the namespace and `use`
//! imports in effect. Interfaces, traits and enums are skipped. Only the
//! class shape is recorded; method bodies and property defaults are ignored.

mod model;

pub use model::{NameContext, PhpClass, PhpMethod, PhpProperty, Visibility};

use crate::error::{CliResult, ParseError};
use crate::scanner::SourceFile;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Node kinds a declared type can take.
const TYPE_KINDS: &[&str] = &[
    "named_type",
    "optional_type",
    "primitive_type",
    "union_type",
    "intersection_type",
    "disjunctive_normal_form_type",
    "bottom_type",
];

/// Parser for PHP source files.
#[derive(Debug, Clone)]
pub struct PhpParser {
    /// Whether abstract classes are reported.
    include_abstract: bool,
}

impl Default for PhpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PhpParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            include_abstract: true,
        }
    }

    /// Set whether abstract classes are reported.
    pub fn with_abstract(mut self, include: bool) -> Self {
        self.include_abstract = include;
        self
    }

    /// Parse a source file and extract its class declarations.
    pub fn parse_file(&self, source: &SourceFile) -> CliResult<Vec<PhpClass>> {
        self.parse_source(&source.content, &source.path)
    }

    /// Parse source code and extract its class declarations.
    pub fn parse_source(&self, content: &str, file_path: &Path) -> CliResult<Vec<PhpClass>> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
            .map_err(|e| ParseError::Grammar(e.to_string()))?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            ParseError::syntax(file_path.to_path_buf(), 1, "parsing was cancelled")
        })?;

        let root = tree.root_node();
        if let Some(error) = first_error(root) {
            let message = if error.is_missing() {
                format!("missing `{}`", error.kind())
            } else {
                let text = content[error.byte_range()].trim();
                let snippet: String = text.chars().take(24).collect();
                format!("unexpected `{snippet}`")
            };
            let line = error_line(error);
            return Err(ParseError::syntax(file_path.to_path_buf(), line, message).into());
        }

        let mut walker = TreeWalker {
            source: content,
            file: file_path,
            classes: Vec::new(),
        };
        let mut context = NameContext::default();
        walker.visit(root, &mut context);

        let classes: Vec<_> = walker
            .classes
            .into_iter()
            .filter(|c| self.include_abstract || !c.is_abstract)
            .collect();

        tracing::trace!(file = %file_path.display(), classes = classes.len(), "parsed PHP source");
        Ok(classes)
    }

    /// Parse multiple source files, collecting errors.
    pub fn parse_files(&self, sources: &[SourceFile]) -> (Vec<PhpClass>, Vec<ParseError>) {
        let mut classes = Vec::new();
        let mut errors = Vec::new();

        for source in sources {
            match self.parse_file(source) {
                Ok(parsed) => classes.extend(parsed),
                Err(crate::error::CliError::Parse(e)) => errors.push(e),
                Err(_) => {}
            }
        }

        (classes, errors)
    }
}

/// First `ERROR` or missing node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

/// Errors inside a class are reported at the class declaration.
fn error_line(error: Node<'_>) -> usize {
    let mut current = Some(error);
    while let Some(node) = current {
        if node.kind() == "class_declaration" {
            return node.start_position().row + 1;
        }
        current = node.parent();
    }
    error.start_position().row + 1
}

fn child_of_kind<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| kinds.contains(&c.kind()));
    found
}

fn has_child_kind(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| c.kind().eq_ignore_ascii_case(kind));
    found
}

/// Modifiers written on a member declaration or promoted parameter.
#[derive(Debug, Default)]
struct Modifiers {
    visibility: Option<Visibility>,
    is_static: bool,
    is_readonly: bool,
    is_abstract: bool,
}

impl Modifiers {
    fn read(node: Node<'_>, source: &str) -> Self {
        let mut modifiers = Self::default();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "visibility_modifier" => {
                    let keyword = source[child.byte_range()].to_ascii_lowercase();
                    modifiers.visibility = Some(match keyword.as_str() {
                        "private" => Visibility::Private,
                        "protected" => Visibility::Protected,
                        _ => Visibility::Public,
                    });
                }
                "static_modifier" => modifiers.is_static = true,
                "readonly_modifier" => modifiers.is_readonly = true,
                "abstract_modifier" => modifiers.is_abstract = true,
                _ => {}
            }
        }
        modifiers
    }

    fn visibility(&self) -> Visibility {
        self.visibility.unwrap_or(Visibility::Public)
    }
}

struct TreeWalker<'a> {
    source: &'a str,
    file: &'a Path,
    classes: Vec<PhpClass>,
}

impl<'a> TreeWalker<'a> {
    fn text(&self, node: Node<'_>) -> &'a str {
        &self.source[node.byte_range()]
    }

    fn visit(&mut self, node: Node<'_>, context: &mut NameContext) {
        match node.kind() {
            "namespace_definition" => {
                let namespace = node
                    .child_by_field_name("name")
                    .map(|n| self.text(n).trim_start_matches('\\').to_string());
                let scoped = NameContext {
                    namespace,
                    imports: Default::default(),
                };

                match node.child_by_field_name("body") {
                    Some(body) => {
                        let mut scoped = scoped;
                        self.visit_children(body, &mut scoped);
                    }
                    None => *context = scoped,
                }
            }
            "namespace_use_declaration" => self.read_use(node, context),
            "class_declaration" => {
                if let Some(class) = self.read_class(node, context) {
                    self.classes.push(class);
                }
            }
            "function_definition"
            | "interface_declaration"
            | "trait_declaration"
            | "enum_declaration" => {}
            _ => self.visit_children(node, context),
        }
    }

    fn visit_children(&mut self, node: Node<'_>, context: &mut NameContext) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, context);
        }
    }

    /// Plain, aliased, comma-separated and grouped imports.
    /// Function and constant imports are ignored.
    fn read_use(&self, node: Node<'_>, context: &mut NameContext) {
        if has_child_kind(node, "function") || has_child_kind(node, "const") {
            return;
        }

        let prefix = child_of_kind(node, &["namespace_name"])
            .map(|n| format!("{}\\", self.text(n).trim_start_matches('\\')))
            .unwrap_or_default();

        self.read_use_clauses(node, &prefix, context);
    }

    fn read_use_clauses(&self, node: Node<'_>, prefix: &str, context: &mut NameContext) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "namespace_use_group" => self.read_use_clauses(child, prefix, context),
                "namespace_use_clause" | "namespace_use_group_clause" => {
                    if has_child_kind(child, "function") || has_child_kind(child, "const") {
                        continue;
                    }
                    let imported = child_of_kind(child, &["name", "qualified_name", "namespace_name"]);
                    let Some(name) = imported else {
                        continue;
                    };
                    let alias = self.use_alias(child, name);
                    context.add_import(&format!("{prefix}{}", self.text(name)), alias);
                }
                _ => {}
            }
        }
    }

    fn use_alias(&self, clause: Node<'_>, imported: Node<'_>) -> Option<&'a str> {
        if let Some(alias) = clause.child_by_field_name("alias") {
            return Some(self.text(alias));
        }
        if let Some(aliasing) = child_of_kind(clause, &["namespace_aliasing_clause"]) {
            return child_of_kind(aliasing, &["name"]).map(|n| self.text(n));
        }

        let mut cursor = clause.walk();
        let alias = clause
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "name" && c.id() != imported.id())
            .last()
            .map(|n| self.text(n));
        alias
    }

    fn read_class(&self, node: Node<'_>, context: &NameContext) -> Option<PhpClass> {
        let name_node = node.child_by_field_name("name")?;
        let name = self.text(name_node).to_string();
        let modifiers = Modifiers::read(node, self.source);

        let parent = child_of_kind(node, &["base_clause"])
            .and_then(|clause| child_of_kind(clause, &["name", "qualified_name"]))
            .map(|n| context.resolve(self.text(n)));

        let mut class = PhpClass {
            fqcn: context.qualify(&name),
            name,
            parent,
            is_abstract: modifiers.is_abstract,
            context: context.clone(),
            properties: Vec::new(),
            methods: Vec::new(),
            file: self.file.to_path_buf(),
            line: name_node.start_position().row + 1,
        };

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                match member.kind() {
                    "property_declaration" => self.read_properties(member, &mut class),
                    "method_declaration" => self.read_method(member, &mut class),
                    _ => {}
                }
            }
        }

        Some(class)
    }

    /// `Type $a = 1, $b;` declares one property per element.
    fn read_properties(&self, node: Node<'_>, class: &mut PhpClass) {
        let modifiers = Modifiers::read(node, self.source);
        let native_type = self.declared_type(node);
        let doc_comment = self.docblock(node);
        let attributes = self.attributes(node);

        let mut cursor = node.walk();
        for element in node.named_children(&mut cursor) {
            if element.kind() != "property_element" {
                continue;
            }
            let Some(name) = element
                .child_by_field_name("name")
                .or_else(|| child_of_kind(element, &["variable_name"]))
            else {
                continue;
            };

            class.properties.push(PhpProperty {
                name: variable_name(self.text(name)),
                visibility: modifiers.visibility(),
                is_static: modifiers.is_static,
                is_readonly: modifiers.is_readonly,
                native_type: native_type.clone(),
                doc_comment: doc_comment.clone(),
                attributes: attributes.clone(),
                promoted: false,
                line: element.start_position().row + 1,
            });
        }
    }

    fn read_method(&self, node: Node<'_>, class: &mut PhpClass) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node).to_string();
        let modifiers = Modifiers::read(node, self.source);
        let doc_comment = self.docblock(node);
        let is_constructor = name.eq_ignore_ascii_case("__construct");

        let mut required_parameters = 0;
        if let Some(parameters) = node.child_by_field_name("parameters") {
            let mut cursor = parameters.walk();
            for parameter in parameters.named_children(&mut cursor) {
                match parameter.kind() {
                    "simple_parameter" | "property_promotion_parameter" => {
                        let has_default = parameter.child_by_field_name("default_value").is_some()
                            || has_child_kind(parameter, "=");
                        if !has_default {
                            required_parameters += 1;
                        }
                    }
                    _ => continue,
                }

                if is_constructor && parameter.kind() == "property_promotion_parameter" {
                    let property = self.promoted_property(parameter, doc_comment.as_deref());
                    class.properties.extend(property);
                }
            }
        }

        let return_type = node
            .child_by_field_name("return_type")
            .map(|t| compact_type(self.text(t)));

        class.methods.push(PhpMethod {
            name,
            visibility: modifiers.visibility(),
            is_static: modifiers.is_static,
            required_parameters,
            return_type,
            doc_comment,
            line: name_node.start_position().row + 1,
        });
    }

    /// Promoted properties share the constructor's docblock.
    fn promoted_property(
        &self,
        node: Node<'_>,
        constructor_doc: Option<&str>,
    ) -> Option<PhpProperty> {
        let name = node
            .child_by_field_name("name")
            .or_else(|| child_of_kind(node, &["variable_name", "by_ref"]))?;
        let modifiers = Modifiers::read(node, self.source);

        Some(PhpProperty {
            name: variable_name(self.text(name)),
            visibility: modifiers.visibility(),
            is_static: false,
            is_readonly: modifiers.is_readonly,
            native_type: self.declared_type(node),
            doc_comment: constructor_doc.map(str::to_string),
            attributes: self.attributes(node),
            promoted: true,
            line: name.start_position().row + 1,
        })
    }

    fn declared_type(&self, node: Node<'_>) -> Option<String> {
        node.child_by_field_name("type")
            .or_else(|| child_of_kind(node, TYPE_KINDS))
            .map(|t| compact_type(self.text(t)))
    }

    /// The `/** ... */` comment directly before a declaration.
    fn docblock(&self, node: Node<'_>) -> Option<String> {
        let previous = node.prev_sibling()?;
        let text = self.text(previous);
        (previous.kind() == "comment" && text.starts_with("/**")).then(|| text.to_string())
    }

    /// Attribute groups without their `#[` `]` delimiters.
    fn attributes(&self, node: Node<'_>) -> Vec<String> {
        let Some(list) = node
            .child_by_field_name("attributes")
            .or_else(|| child_of_kind(node, &["attribute_list"]))
        else {
            return Vec::new();
        };

        let mut cursor = list.walk();
        let groups = list
            .named_children(&mut cursor)
            .filter(|g| g.kind() == "attribute_group")
            .map(|g| {
                let text = self.text(g).trim();
                let text = text.strip_prefix("#[").unwrap_or(text);
                text.strip_suffix(']').unwrap_or(text).trim().to_string()
            })
            .collect();
        groups
    }
}

/// `$name` or `&$name` to `name`.
fn variable_name(text: &str) -> String {
    text.trim_start_matches(|c: char| c == '&' || c == '$' || c.is_whitespace())
        .to_string()
}

/// Type text without the whitespace PHP allows around `?`, `|` and `&`.
fn compact_type(text: &str) -> String {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse_code(code: &str) -> Vec<PhpClass> {
        let parser = PhpParser::new();
        parser
            .parse_source(code, &PathBuf::from("test.php"))
            .unwrap()
    }

    #[test]
    fn test_parse_simple_class() {
        let code = r#"<?php
            namespace App\Entity;

            class Order
            {
                public int $id;
                private ?\DateTime $createdAt = null;
            }
        "#;

        let classes = parse_code(code);
        assert_eq!(classes.len(), 1);

        let order = &classes[0];
        assert_eq!(order.name, "Order");
        assert_eq!(order.fqcn, "App\\Entity\\Order");
        assert_eq!(order.line, 4);
        assert_eq!(order.properties.len(), 2);
        assert_eq!(order.properties[0].name, "id");
        assert_eq!(order.properties[0].native_type.as_deref(), Some("int"));
        assert_eq!(order.properties[1].visibility, Visibility::Private);
        assert_eq!(order.properties[1].native_type.as_deref(), Some("?\\DateTime"));
    }

    #[test]
    fn test_parse_global_namespace() {
        let classes = parse_code("<?php class Item { public $name; }");
        assert_eq!(classes[0].fqcn, "Item");
        assert_eq!(classes[0].properties[0].native_type, None);
    }

    #[test]
    fn test_parse_use_statements() {
        let code = r#"<?php
            namespace App\Entity;

            use Doctrine\ORM\Mapping as ORM;
            use App\Billing\{Invoice, Payment as Settlement};
            use Doctrine\Common\Collections\Collection, App\Model\Tag;
            use function strlen;

            class Order {}
        "#;

        let classes = parse_code(code);
        let ctx = &classes[0].context;
        assert_eq!(ctx.resolve("ORM\\Column"), "Doctrine\\ORM\\Mapping\\Column");
        assert_eq!(ctx.resolve("Invoice"), "App\\Billing\\Invoice");
        assert_eq!(ctx.resolve("Settlement"), "App\\Billing\\Payment");
        assert_eq!(ctx.resolve("Collection"), "Doctrine\\Common\\Collections\\Collection");
        assert_eq!(ctx.resolve("Tag"), "App\\Model\\Tag");
        assert!(!ctx.imports.contains_key("strlen"));
    }

    #[test]
    fn test_docblocks_and_attributes_attach_to_properties() {
        let code = r#"<?php
            class Order
            {
                /**
                 * @var Item[]
                 */
                #[ORM\OneToMany(targetEntity: Item::class, mappedBy: 'order')]
                private $items;

                private $total;
            }
        "#;

        let classes = parse_code(code);
        let items = classes[0].property("items").unwrap();
        assert!(items.doc_comment.as_deref().unwrap().contains("@var Item[]"));
        assert_eq!(items.attributes.len(), 1);
        assert!(items.attributes[0].starts_with("ORM\\OneToMany"));

        let total = classes[0].property("total").unwrap();
        assert!(total.doc_comment.is_none());
        assert!(total.attributes.is_empty());
    }

    #[test]
    fn test_multiple_properties_in_one_declaration() {
        let classes = parse_code("<?php class P { /** @var int */ public $x = 1, $y = [1, 2]; }");
        let props = &classes[0].properties;
        assert_eq!(props.len(), 2);
        assert_eq!(props[1].name, "y");
        assert!(props[1].doc_comment.is_some());
    }

    #[test]
    fn test_static_and_readonly_flags() {
        let code = "<?php class C { public static int $count = 0; public readonly string $code; }";
        let props = &parse_code(code)[0].properties;
        assert!(props[0].is_static);
        assert!(props[1].is_readonly);
        assert!(!props[1].is_static);
    }

    #[test]
    fn test_methods() {
        let code = r#"<?php
            class Order
            {
                private $id;

                /** @return int */
                public function getId(): int { return $this->id; }

                public function setId(int $id = 0): void { $this->id = $id; }

                private static function create(array $data, $flag) { return new static(); }

                abstract protected function total(): ?float;
            }
        "#;

        let class = &parse_code(code)[0];
        assert_eq!(class.methods.len(), 4);

        let get_id = class.method("getid").unwrap();
        assert_eq!(get_id.return_type.as_deref(), Some("int"));
        assert!(get_id.doc_comment.as_deref().unwrap().contains("@return int"));
        assert_eq!(get_id.required_parameters, 0);

        assert_eq!(class.method("setId").unwrap().required_parameters, 0);

        let create = class.method("create").unwrap();
        assert!(create.is_static);
        assert_eq!(create.visibility, Visibility::Private);
        assert_eq!(create.required_parameters, 2);

        assert_eq!(class.method("total").unwrap().return_type.as_deref(), Some("?float"));
    }

    #[test]
    fn test_promoted_constructor_properties() {
        let code = r#"<?php
            class Money
            {
                /**
                 * @param int $amount
                 */
                public function __construct(
                    private readonly int $amount,
                    #[Assert\Currency] public string $currency = 'EUR',
                    bool $plain = false,
                ) {}
            }
        "#;

        let class = &parse_code(code)[0];
        assert_eq!(class.properties.len(), 2);

        let amount = class.property("amount").unwrap();
        assert!(amount.promoted);
        assert!(amount.is_readonly);
        assert_eq!(amount.native_type.as_deref(), Some("int"));
        assert!(amount.doc_comment.as_deref().unwrap().contains("@param int $amount"));

        let currency = class.property("currency").unwrap();
        assert_eq!(currency.attributes, vec!["Assert\\Currency".to_string()]);
        assert!(class.property("plain").is_none());
    }

    #[test]
    fn test_union_and_intersection_types() {
        let code = "<?php class U { public int|string|null $a; public (A&B)|null $b; }";
        let props = &parse_code(code)[0].properties;
        assert_eq!(props[0].native_type.as_deref(), Some("int|string|null"));
        assert_eq!(props[1].native_type.as_deref(), Some("(A&B)|null"));
    }

    #[test]
    fn test_by_reference_parameter_is_not_a_type() {
        let code = "<?php class R { public function __construct(public array &$list) {} }";
        let props = &parse_code(code)[0].properties;
        assert_eq!(props[0].native_type.as_deref(), Some("array"));
    }

    #[test]
    fn test_interfaces_traits_and_enums_are_skipped() {
        let code = r#"<?php
            interface HasId { public function getId(): int; }
            trait Timestampable { private $createdAt; }
            enum Status: string { case Open = 'open'; }
            final class Order { use Timestampable; private $id; }
        "#;

        let classes = parse_code(code);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Order");
        assert_eq!(classes[0].properties.len(), 1);
    }

    #[test]
    fn test_class_constant_and_anonymous_class_are_not_declarations() {
        let code = r#"<?php
            $a = Order::class;
            $b = new class { public $x; };
            class Real { const KIND = 'real'; public $y; }
        "#;

        let classes = parse_code(code);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Real");
        assert_eq!(classes[0].properties.len(), 1);
    }

    #[test]
    fn test_abstract_and_parent() {
        let code = r#"<?php
            namespace App;
            use Base\Entity;
            abstract class Model extends Entity {}
            class Order extends Model {}
        "#;

        let classes = parse_code(code);
        assert!(classes[0].is_abstract);
        assert_eq!(classes[0].parent.as_deref(), Some("Base\\Entity"));
        assert!(!classes[1].is_abstract);
        assert_eq!(classes[1].parent.as_deref(), Some("App\\Model"));

        let concrete = PhpParser::new()
            .with_abstract(false)
            .parse_source(code, Path::new("test.php"))
            .unwrap();
        assert_eq!(concrete.len(), 1);
    }

    #[test]
    fn test_braced_namespaces() {
        let code = r#"<?php
            namespace App\One { class A {} }
            namespace App\Two { class B {} }
            namespace { class C {} }
        "#;

        let fqcns: Vec<_> = parse_code(code).into_iter().map(|c| c.fqcn).collect();
        assert_eq!(fqcns, vec!["App\\One\\A", "App\\Two\\B", "C"]);
    }

    #[test]
    fn test_method_bodies_with_braces_in_strings() {
        let code = r#"<?php
            class T {
                public function f() { if (true) { $s = "}"; } return '{'; }
                public $after;
            }
        "#;

        assert!(parse_code(code)[0].property("after").is_some());
    }

    #[test]
    fn test_file_without_class() {
        assert!(parse_code("<?php function helper() { return 1; }").is_empty());
    }

    #[test]
    fn test_unterminated_class_body() {
        let result = PhpParser::new().parse_source(
            "<?php\nclass Broken {\n public $a;\n",
            &PathBuf::from("Broken.php"),
        );

        match result.unwrap_err() {
            crate::error::CliError::Parse(ParseError::Syntax { file, line, .. }) => {
                assert_eq!(file, PathBuf::from("Broken.php"));
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_files_collects_errors() {
        let sources = vec![
            SourceFile {
                path: PathBuf::from("Good.php"),
                relative_path: PathBuf::from("Good.php"),
                content: "<?php class Good {}".to_string(),
            },
            SourceFile {
                path: PathBuf::from("Bad.php"),
                relative_path: PathBuf::from("Bad.php"),
                content: "<?php class Bad {".to_string(),
            },
        ];

        let (classes, errors) = PhpParser::new().parse_files(&sources);
        assert_eq!(classes.len(), 1);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_heredoc_and_inline_html_do_not_hide_members() {
        let code = r#"<?php
            class Report
            {
                public function template(): string
                {
                    return <<<TXT
                    { not a block }
                    TXT;
                }

                public ?string $title = null;
            }
            ?>
            <p>{ trailing html }</p>
        "#;

        let class = &parse_code(code)[0];
        assert_eq!(class.property("title").unwrap().native_type.as_deref(), Some("?string"));
        assert_eq!(class.method("template").unwrap().return_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_spaced_union_type_is_compacted() {
        let code = "<?php class S { public int | null $a; }";
        let props = &parse_code(code)[0].properties;
        assert_eq!(props[0].native_type.as_deref(), Some("int|null"));
    }

    #[test]
    fn test_syntax_error_outside_a_class() {
        let result = PhpParser::new().parse_source(
            "<?php\n$a = ;\nclass Fine {}\n",
            &PathBuf::from("Stray.php"),
        );

        match result.unwrap_err() {
            crate::error::CliError::Parse(ParseError::Syntax { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
