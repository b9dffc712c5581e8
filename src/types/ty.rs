use std::fmt;

use crate::error::{Arity, ConstructionError};

/// A value type of the classification lattice.
///
/// Types are classifiers: they are only ever used to ask whether a term
/// belongs to them (see [`super::belongs_to`]). Types are values too, so a
/// `Type` can be the argument of `is-in-type` or of a typed variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    Values,
    ValueTypes,
    GroundValues,
    Empty,
    Null,
    Booleans,
    Integers,
    NaturalNumbers,
    Characters,
    Strings,
    Atoms,
    DatatypeValues,
    Maps(Box<Type>, Box<Type>),
    Sets(Box<Type>),
    Lists(Box<Type>),
    Vectors(Box<Type>),
    Tuples(Vec<Type>),
    Union(Vec<Type>),
    Intersection(Vec<Type>),
    Complement(Box<Type>),
}

impl Type {
    pub fn maps(key: Type, value: Type) -> Self {
        Type::Maps(Box::new(key), Box::new(value))
    }

    pub fn sets(element: Type) -> Self {
        Type::Sets(Box::new(element))
    }

    pub fn lists(element: Type) -> Self {
        Type::Lists(Box::new(element))
    }

    pub fn union(left: Type, right: Type) -> Self {
        Type::Union(vec![left, right])
    }

    pub fn intersection(left: Type, right: Type) -> Self {
        Type::Intersection(vec![left, right])
    }

    pub fn complement(inner: Type) -> Self {
        Type::Complement(Box::new(inner))
    }

    fn is_compound(&self) -> bool {
        matches!(
            self,
            Type::Union(_) | Type::Intersection(_) | Type::Complement(_)
        )
    }

    pub fn pretty(&self) -> String {
        let nested = |ty: &Type| {
            if ty.is_compound() {
                format!("({})", ty.pretty())
            } else {
                ty.pretty()
            }
        };
        let joined = |types: &[Type], separator: &str| {
            types.iter().map(nested).collect::<Vec<_>>().join(separator)
        };

        match self {
            Type::Values => "values".to_string(),
            Type::ValueTypes => "value-types".to_string(),
            Type::GroundValues => "ground-values".to_string(),
            Type::Empty => "empty-type".to_string(),
            Type::Null => "null-type".to_string(),
            Type::Booleans => "booleans".to_string(),
            Type::Integers => "integers".to_string(),
            Type::NaturalNumbers => "natural-numbers".to_string(),
            Type::Characters => "characters".to_string(),
            Type::Strings => "strings".to_string(),
            Type::Atoms => "atoms".to_string(),
            Type::DatatypeValues => "datatype-values".to_string(),
            Type::Maps(key, value) => format!("maps({},{})", key.pretty(), value.pretty()),
            Type::Sets(element) => format!("sets({})", element.pretty()),
            Type::Lists(element) => format!("lists({})", element.pretty()),
            Type::Vectors(element) => format!("vectors({})", element.pretty()),
            Type::Tuples(elements) => format!(
                "tuples({})",
                elements
                    .iter()
                    .map(Type::pretty)
                    .collect::<Vec<_>>()
                    .join(",")
            ),
            Type::Union(types) => joined(types, " | "),
            Type::Intersection(types) => joined(types, " & "),
            Type::Complement(inner) => format!("~{}", nested(&**inner)),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// Named type constructor as it appears in the operator catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCtor {
    Values,
    ValueTypes,
    GroundValues,
    EmptyType,
    NullType,
    Booleans,
    Integers,
    NaturalNumbers,
    Characters,
    Strings,
    Atoms,
    DatatypeValues,
    Maps,
    Sets,
    Lists,
    Vectors,
    Tuples,
    Union,
    Intersection,
    Complement,
}

impl TypeCtor {
    pub const ALL: &'static [TypeCtor] = &[
        TypeCtor::Values,
        TypeCtor::ValueTypes,
        TypeCtor::GroundValues,
        TypeCtor::EmptyType,
        TypeCtor::NullType,
        TypeCtor::Booleans,
        TypeCtor::Integers,
        TypeCtor::NaturalNumbers,
        TypeCtor::Characters,
        TypeCtor::Strings,
        TypeCtor::Atoms,
        TypeCtor::DatatypeValues,
        TypeCtor::Maps,
        TypeCtor::Sets,
        TypeCtor::Lists,
        TypeCtor::Vectors,
        TypeCtor::Tuples,
        TypeCtor::Union,
        TypeCtor::Intersection,
        TypeCtor::Complement,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TypeCtor::Values => "values",
            TypeCtor::ValueTypes => "value-types",
            TypeCtor::GroundValues => "ground-values",
            TypeCtor::EmptyType => "empty-type",
            TypeCtor::NullType => "null-type",
            TypeCtor::Booleans => "booleans",
            TypeCtor::Integers => "integers",
            TypeCtor::NaturalNumbers => "natural-numbers",
            TypeCtor::Characters => "characters",
            TypeCtor::Strings => "strings",
            TypeCtor::Atoms => "atoms",
            TypeCtor::DatatypeValues => "datatype-values",
            TypeCtor::Maps => "maps",
            TypeCtor::Sets => "sets",
            TypeCtor::Lists => "lists",
            TypeCtor::Vectors => "vectors",
            TypeCtor::Tuples => "tuples",
            TypeCtor::Union => "union-type",
            TypeCtor::Intersection => "intersection-type",
            TypeCtor::Complement => "complement-type",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            TypeCtor::Maps => Arity::Exactly(2),
            TypeCtor::Sets | TypeCtor::Lists | TypeCtor::Vectors | TypeCtor::Complement => {
                Arity::Exactly(1)
            }
            TypeCtor::Tuples => Arity::AtLeast(0),
            TypeCtor::Union | TypeCtor::Intersection => Arity::AtLeast(1),
            _ => Arity::Exactly(0),
        }
    }

    /// Apply the constructor to already-built type arguments.
    pub fn build(self, args: Vec<Type>) -> Result<Type, ConstructionError> {
        let found = args.len();
        let fits = match self.arity() {
            Arity::Exactly(n) => found == n,
            Arity::AtLeast(n) => found >= n,
        };
        if !fits {
            return Err(ConstructionError::Arity {
                operator: self.name().to_string(),
                expected: self.arity(),
                found,
            });
        }

        let mut args = args.into_iter();

        Ok(match self {
            TypeCtor::Values => Type::Values,
            TypeCtor::ValueTypes => Type::ValueTypes,
            TypeCtor::GroundValues => Type::GroundValues,
            TypeCtor::EmptyType => Type::Empty,
            TypeCtor::NullType => Type::Null,
            TypeCtor::Booleans => Type::Booleans,
            TypeCtor::Integers => Type::Integers,
            TypeCtor::NaturalNumbers => Type::NaturalNumbers,
            TypeCtor::Characters => Type::Characters,
            TypeCtor::Strings => Type::Strings,
            TypeCtor::Atoms => Type::Atoms,
            TypeCtor::DatatypeValues => Type::DatatypeValues,
            TypeCtor::Maps => Type::Maps(next(&mut args), next(&mut args)),
            TypeCtor::Sets => Type::Sets(next(&mut args)),
            TypeCtor::Lists => Type::Lists(next(&mut args)),
            TypeCtor::Vectors => Type::Vectors(next(&mut args)),
            TypeCtor::Complement => Type::Complement(next(&mut args)),
            TypeCtor::Tuples => Type::Tuples(args.collect()),
            TypeCtor::Union => Type::Union(args.collect()),
            TypeCtor::Intersection => Type::Intersection(args.collect()),
        })
    }
}

// Arity has been checked before this is called.
fn next(args: &mut std::vec::IntoIter<Type>) -> Box<Type> {
    Box::new(args.next().unwrap_or(Type::Empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_print_leaves() {
        assert_eq!(Type::Booleans.pretty(), "booleans");
        assert_eq!(Type::NaturalNumbers.pretty(), "natural-numbers");
        assert_eq!(Type::Empty.pretty(), "empty-type");
    }

    #[test]
    fn test_pretty_print_containers() {
        let ty = Type::maps(Type::Integers, Type::Strings);
        assert_eq!(ty.pretty(), "maps(integers,strings)");
        assert_eq!(
            Type::Tuples(vec![Type::Booleans, Type::Atoms]).pretty(),
            "tuples(booleans,atoms)"
        );
    }

    #[test]
    fn test_pretty_print_nested_operators() {
        let ty = Type::complement(Type::union(Type::Booleans, Type::Null));
        assert_eq!(ty.pretty(), "~(booleans | null-type)");
    }

    #[test]
    fn test_build_checks_arity() {
        assert_eq!(
            TypeCtor::Sets.build(vec![Type::Integers]),
            Ok(Type::sets(Type::Integers))
        );
        assert!(matches!(
            TypeCtor::Maps.build(vec![Type::Integers]),
            Err(ConstructionError::Arity { found: 1, .. })
        ));
        assert!(matches!(
            TypeCtor::Booleans.build(vec![Type::Integers]),
            Err(ConstructionError::Arity { .. })
        ));
    }
}
