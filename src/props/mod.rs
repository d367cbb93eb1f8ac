//! Unified view over a parsed props document.
//!
//! Props files hold three well-known lists of material parameters plus
//! assorted root fields. [`unify`] turns the generic [`Tree`] into
//! [`UnifiedProps`], recognising parameter nodes by their shape: a dict
//! with exactly `ParameterName`, `ParameterValue` and `ParameterInfo`
//! (or `ParameterType`) keys, where name and info are plain strings.

mod node;

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::parser::{Tree, Value};

pub use node::{ParameterList, ParameterNode};

/// Root key of the texture parameter list.
pub const TEXTURE_PARAMETERS: &str = "TextureParameterValues";
/// Root key of the scalar parameter list.
pub const SCALAR_PARAMETERS: &str = "ScalarParameterValues";
/// Root key of the vector parameter list.
pub const VECTOR_PARAMETERS: &str = "VectorParameterValues";

const NODE_NAME: &str = "ParameterName";
const NODE_VALUE: &str = "ParameterValue";
const NODE_KINDS: [&str; 2] = ["ParameterInfo", "ParameterType"];

/// A unified value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Scalar(String),
    Node(ParameterNode),
    Dict(IndexMap<String, Field>),
    List(ParameterList),
}

/// A props document split into its parameter lists and root fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnifiedProps {
    #[serde(rename = "TextureParameterValues")]
    pub texture: ParameterList,
    #[serde(rename = "ScalarParameterValues")]
    pub scalar: ParameterList,
    #[serde(rename = "VectorParameterValues")]
    pub vector: ParameterList,
    #[serde(flatten)]
    pub root: IndexMap<String, Field>,
}

impl UnifiedProps {
    /// Look up a root field by name.
    pub fn root_field(&self, name: &str) -> Option<&Field> {
        self.root.get(name)
    }

    /// The scalar value of a texture parameter, e.g. `Texture2D'...'`.
    pub fn texture_value(&self, name: &str) -> Option<&str> {
        self.texture.get(name).and_then(|node| node.value.as_scalar())
    }
}

/// A list element that could not be turned into a parameter node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnificationWarning {
    /// Where the element sits, e.g. `VectorParameterValues[3]`.
    pub path: String,
    pub reason: String,
}

impl fmt::Display for UnificationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Result of unification: the props and any skipped elements.
#[derive(Debug, Clone, Default)]
pub struct Unified {
    pub props: UnifiedProps,
    pub warnings: Vec<UnificationWarning>,
}

/// Unify a parsed props tree.
pub fn unify(tree: Tree) -> Unified {
    let mut unifier = Unifier::default();
    let mut props = UnifiedProps::default();

    for (key, value) in tree {
        let target = match key.as_str() {
            TEXTURE_PARAMETERS => &mut props.texture,
            SCALAR_PARAMETERS => &mut props.scalar,
            VECTOR_PARAMETERS => &mut props.vector,
            _ => {
                let field = unifier.field(&key, value);
                props.root.insert(key, field);
                continue;
            }
        };

        match value {
            Value::List(items) => *target = unifier.list(&key, items),
            other => unifier.warn(&key, format!("expected a list, found a {}", other.kind_name())),
        }
    }

    Unified {
        props,
        warnings: unifier.warnings,
    }
}

/// Whether a dict has exactly the parameter node shape.
pub fn is_node_like(dict: &Tree) -> bool {
    let kind = NODE_KINDS.iter().find_map(|k| dict.get(*k));
    dict.len() == 3
        && dict.get(NODE_NAME).and_then(Value::as_scalar).is_some()
        && dict.contains_key(NODE_VALUE)
        && kind.and_then(Value::as_scalar).is_some()
}

/// Convert a node-like dict, handing it back unchanged otherwise.
fn into_node(mut dict: Tree) -> std::result::Result<ParameterNode, Tree> {
    if !is_node_like(&dict) {
        return Err(dict);
    }
    let take_scalar = |dict: &mut Tree, key: &str| match dict.shift_remove(key) {
        Some(Value::Scalar(s)) => s,
        _ => String::new(),
    };
    let name = take_scalar(&mut dict, NODE_NAME);
    let kind = NODE_KINDS
        .iter()
        .find(|k| dict.contains_key(**k))
        .map(|k| take_scalar(&mut dict, k))
        .unwrap_or_default();
    let value = dict
        .shift_remove(NODE_VALUE)
        .unwrap_or(Value::Scalar(String::new()));
    Ok(ParameterNode::new(name, value, kind))
}

#[derive(Default)]
struct Unifier {
    warnings: Vec<UnificationWarning>,
}

impl Unifier {
    fn warn(&mut self, path: &str, reason: impl Into<String>) {
        self.warnings.push(UnificationWarning {
            path: path.to_string(),
            reason: reason.into(),
        });
    }

    fn field(&mut self, path: &str, value: Value) -> Field {
        match value {
            Value::Scalar(s) => Field::Scalar(s),
            Value::Dict(dict) => match into_node(dict) {
                Ok(node) => Field::Node(node),
                Err(dict) => Field::Dict(
                    dict.into_iter()
                        .map(|(key, value)| {
                            let field = self.field(&format!("{}.{}", path, key), value);
                            (key, field)
                        })
                        .collect(),
                ),
            },
            Value::List(items) => Field::List(self.list(path, items)),
        }
    }

    /// Build a parameter list, skipping elements that are not nodes.
    fn list(&mut self, path: &str, items: Vec<Option<Value>>) -> ParameterList {
        let mut list = ParameterList::new();
        for (index, item) in items.into_iter().enumerate() {
            let item_path = format!("{}[{}]", path, index);
            match item {
                None => self.warn(&item_path, "list slot was never assigned"),
                Some(Value::Dict(dict)) => match into_node(dict) {
                    Ok(node) => {
                        if let Err(e) = list.push(node) {
                            self.warn(&item_path, e.to_string());
                        }
                    }
                    Err(dict) => {
                        let keys: Vec<&str> = dict.keys().map(String::as_str).collect();
                        self.warn(
                            &item_path,
                            format!("not a parameter node (keys: {})", keys.join(", ")),
                        );
                    }
                },
                Some(other) => self.warn(
                    &item_path,
                    format!("not a parameter node (found a {})", other.kind_name()),
                ),
            }
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_notation;
    use pretty_assertions::assert_eq;

    const PROPS: &str = r#"Parent=MaterialInstanceConstant'GD_Base.Mat_Skin'
bHasStaticPermutationResource=True
Flags={ Lit=True, TwoSided=Not Really }
TextureParameterValues[2]=
{
    TextureParameterValues[0]=
    {
        ParameterName=p_Diffuse
        ParameterValue=Texture2D'GD_Skin.Textures.Dif'
        ParameterInfo=TextureParameterValue
    }
    TextureParameterValues[1]=
    {
        ParameterName=p_Masks
        ParameterValue=Texture2D'GD_Skin.Textures.Msk'
        ParameterInfo=TextureParameterValue
    }
}
ScalarParameterValues[1]=
{
    ScalarParameterValues[0]=
    {
        ParameterName=p_Gloss
        ParameterValue=0.350000
        ParameterType=ScalarParameterValue
    }
}
VectorParameterValues[1]=
{
    VectorParameterValues[0]=
    {
        ParameterName=p_AColorShadow
        ParameterValue={ R=0.5, G=0.25, B=0.1, A=1.0 }
        ParameterInfo=VectorParameterValue
    }
}
"#;

    #[test]
    fn test_unify_reserved_lists() {
        let unified = unify(parse_notation(PROPS).unwrap());
        assert!(unified.warnings.is_empty());

        let props = unified.props;
        assert_eq!(props.texture.len(), 2);
        assert_eq!(props.texture_value("p_Masks"), Some("Texture2D'GD_Skin.Textures.Msk'"));
        assert_eq!(props.scalar.get("p_Gloss").unwrap().kind, "ScalarParameterValue");

        let colour = props.vector.get("p_AColorShadow").unwrap();
        let channels = colour.value.as_dict().unwrap();
        assert_eq!(channels["G"], Value::from("0.25"));
    }

    #[test]
    fn test_unify_root_fields_verbatim() {
        let props = unify(parse_notation(PROPS).unwrap()).props;

        assert_eq!(
            props.root_field("Parent"),
            Some(&Field::Scalar("MaterialInstanceConstant'GD_Base.Mat_Skin'".to_string()))
        );
        let Some(Field::Dict(flags)) = props.root_field("Flags") else {
            panic!("Flags should stay a dict");
        };
        assert_eq!(flags["TwoSided"], Field::Scalar("Not Really ".to_string()));
        assert!(props.root_field(TEXTURE_PARAMETERS).is_none());
    }

    #[test]
    fn test_node_like_requires_exact_keys() {
        let tree = parse_notation("A={ParameterName=x,ParameterValue=1,ParameterInfo=i}").unwrap();
        assert!(is_node_like(tree["A"].as_dict().unwrap()));

        let extra = parse_notation(
            "A={ParameterName=x,ParameterValue=1,ParameterInfo=i,ExpressionGUID=0}",
        )
        .unwrap();
        assert!(!is_node_like(extra["A"].as_dict().unwrap()));

        let missing = parse_notation("A={ParameterName=x,ParameterValue=1}").unwrap();
        assert!(!is_node_like(missing["A"].as_dict().unwrap()));

        let dict_name =
            parse_notation("A={ParameterName={X=1},ParameterValue=1,ParameterInfo=i}").unwrap();
        assert!(!is_node_like(dict_name["A"].as_dict().unwrap()));
    }

    #[test]
    fn test_nested_node_in_root_dict() {
        let tree = parse_notation(
            "Outer={Inner={ParameterName=n,ParameterValue={R=1},ParameterInfo=i},Other=2}",
        )
        .unwrap();
        let props = unify(tree).props;

        let Some(Field::Dict(outer)) = props.root_field("Outer") else {
            panic!("Outer should be a dict");
        };
        let Field::Node(node) = &outer["Inner"] else {
            panic!("Inner should be a node");
        };
        assert_eq!(node.name, "n");
        assert_eq!(outer["Other"], Field::Scalar("2".to_string()));
    }

    #[test]
    fn test_non_node_elements_are_skipped_with_warnings() {
        let source = "VectorParameterValues[4]={
VectorParameterValues[0]={ParameterName=a,ParameterValue=1,ParameterInfo=i}
VectorParameterValues[1]=loose
VectorParameterValues[3]={ParameterName=a,ParameterValue=2,ParameterInfo=i}
}";
        let unified = unify(parse_notation(source).unwrap());

        assert_eq!(unified.props.vector.len(), 1);
        let paths: Vec<&str> = unified.warnings.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "VectorParameterValues[1]",
                "VectorParameterValues[2]",
                "VectorParameterValues[3]",
            ]
        );
    }

    #[test]
    fn test_reserved_key_with_scalar_value() {
        let unified = unify(parse_notation("TextureParameterValues=none").unwrap());
        assert!(unified.props.texture.is_empty());
        assert_eq!(unified.warnings.len(), 1);
        assert_eq!(unified.warnings[0].to_string(), "TextureParameterValues: expected a list, found a scalar");
    }

    #[test]
    fn test_missing_reserved_lists_are_empty() {
        let unified = unify(parse_notation("A=1").unwrap());
        assert!(unified.props.texture.is_empty());
        assert!(unified.props.scalar.is_empty());
        assert!(unified.props.vector.is_empty());
    }

    #[test]
    fn test_scalars_round_trip() {
        let props = unify(parse_notation(PROPS).unwrap()).props;

        assert_eq!(
            props.root_field("bHasStaticPermutationResource"),
            Some(&Field::Scalar("True".to_string()))
        );
        assert_eq!(props.scalar.get("p_Gloss").unwrap().value, Value::from("0.350000"));
    }

    #[test]
    fn test_serialize_props() {
        let props = unify(parse_notation("A=1\nScalarParameterValues[1]={ScalarParameterValues[0]={ParameterName=s,ParameterValue=2,ParameterInfo=i}}").unwrap()).props;
        let json = serde_json::to_value(&props).unwrap();

        assert_eq!(json["A"], "1");
        assert_eq!(json["ScalarParameterValues"][0]["name"], "s");
        assert_eq!(json["TextureParameterValues"], serde_json::json!([]));
    }
}
