//! The six concrete scenarios and the stated boundaries of spec §8, plus
//! the quantified invariants restated as direct assertions rather than
//! property tests (those live in `tests/prop_parser_invariants.rs`).

use tsig_par::*;
use tsig_util::buffer::Buffer;
use tsig_util::symbol::Symbol;

fn type_buffer(src: &'static str) -> Buffer {
    Buffer::new("t.tsig", src).expect("buffer")
}

#[test]
fn scenario_1_array_of_integer() {
    let buffer = type_buffer("Array[Integer]");
    let ty = parse_type(&buffer, 1, 1, &[]).expect("type");
    match ty {
        Type::ClassInstance { name, args, .. } => {
            assert_eq!(name.kind, NameKind::Class);
            assert_eq!(name.name.as_str(), "Array");
            match args.as_slice() {
                [Type::ClassInstance { name, .. }] => {
                    assert_eq!(name.kind, NameKind::Class);
                    assert_eq!(name.name.as_str(), "Integer");
                }
                other => panic!("expected a single class-instance arg, got {other:?}"),
            }
        }
        other => panic!("expected a class instance, got {other:?}"),
    }
}

#[test]
fn scenario_2_proc_with_required_and_optional_positionals() {
    let buffer = type_buffer("^(Integer, ?String) -> bool");
    let ty = parse_type(&buffer, 1, 1, &[]).expect("type");
    match ty {
        Type::Proc { function, .. } => {
            assert_eq!(function.required_positionals.len(), 1);
            assert_eq!(function.optional_positionals.len(), 1);
            assert!(matches!(*function.return_type, Type::Base(BaseKind::Bool, _)));
        }
        other => panic!("expected a proc type, got {other:?}"),
    }
}

#[test]
fn scenario_3_generic_alias_with_variable_in_union() {
    let buffer = type_buffer("type result[T] = T | nil\n");
    let decls = parse_signature(&buffer, 1, 1).expect("decls");
    match decls.as_slice() {
        [Declaration::Alias(alias)] => {
            assert_eq!(alias.name.name.as_str(), "result");
            match &alias.ty {
                Type::Union { types, .. } => match types.as_slice() {
                    [Type::Variable { name, .. }, Type::Base(BaseKind::Nil, _)] => {
                        assert_eq!(*name, Symbol::intern("T"));
                    }
                    other => panic!("expected [var T, nil], got {other:?}"),
                },
                other => panic!("expected a union, got {other:?}"),
            }
        }
        other => panic!("expected a single alias declaration, got {other:?}"),
    }
}

#[test]
fn scenario_4_interface_block_param_is_a_type_variable_not_a_class_ref() {
    let buffer = type_buffer("interface _Each[T]\n  def each: () { (T) -> void } -> self\nend\n");
    let decls = parse_signature(&buffer, 1, 1).expect("decls");
    match decls.as_slice() {
        [Declaration::Interface(iface)] => {
            assert_eq!(iface.type_params.len(), 1);
            match iface.members.as_slice() {
                [Member::Method(method)] => {
                    assert_eq!(method.types.len(), 1);
                    let block = method.types[0].block.as_ref().expect("block");
                    match block.function.required_positionals.as_slice() {
                        [param] => assert!(matches!(param.ty, Type::Variable { .. })),
                        other => panic!("expected one block param, got {other:?}"),
                    }
                    assert!(matches!(*method.types[0].function.return_type, Type::Base(BaseKind::SelfType, _)));
                }
                other => panic!("expected one method member, got {other:?}"),
            }
        }
        other => panic!("expected a single interface declaration, got {other:?}"),
    }
}

#[test]
fn scenario_5_comment_attaches_only_to_the_contiguous_following_declaration() {
    let buffer = type_buffer("C1 : Integer\n\n# hello\nC2 : String\n");
    let decls = parse_signature(&buffer, 1, 1).expect("decls");
    match decls.as_slice() {
        [Declaration::Constant(c1), Declaration::Constant(c2)] => {
            assert!(c1.comment.is_none());
            assert_eq!(c2.comment.as_ref().expect("comment").content, "hello\n");
        }
        other => panic!("expected two constant declarations, got {other:?}"),
    }
}

#[test]
fn scenario_6_record_with_symbol_and_string_keys() {
    let buffer = type_buffer(r#"{ name: String, "age" => Integer }"#);
    let ty = parse_type(&buffer, 1, 1, &[]).expect("type");
    match ty {
        Type::Record { fields, .. } => {
            assert_eq!(fields.len(), 2);
            let (k0, v0) = fields.get_index(0).unwrap();
            assert_eq!(*k0, Literal::Symbol(Symbol::intern("name")));
            assert!(matches!(v0, Type::ClassInstance { .. }));
            let (k1, v1) = fields.get_index(1).unwrap();
            assert_eq!(*k1, Literal::String(Symbol::intern("age")));
            assert!(matches!(v1, Type::ClassInstance { .. }));
        }
        other => panic!("expected a record, got {other:?}"),
    }
}

#[test]
fn boundary_empty_buffer_yields_empty_declaration_list() {
    let buffer = type_buffer("");
    assert!(parse_signature(&buffer, 1, 1).expect("decls").is_empty());
}

#[test]
fn boundary_comment_only_buffer_yields_empty_list_and_drops_the_comment() {
    let buffer = type_buffer("# orphaned, nothing follows\n");
    assert!(parse_signature(&buffer, 1, 1).expect("decls").is_empty());
}

#[test]
fn boundary_interface_member_starting_with_extend_is_rejected() {
    let buffer = type_buffer("interface _Foo\n  extend Bar\nend\n");
    let err = parse_signature(&buffer, 1, 1).unwrap_err();
    assert!(err.to_string().contains("include"));
}

#[test]
fn boundary_interface_member_starting_with_prepend_is_rejected() {
    let buffer = type_buffer("interface _Foo\n  prepend Bar\nend\n");
    let err = parse_signature(&buffer, 1, 1).unwrap_err();
    assert!(err.to_string().contains("include"));
}

#[test]
fn invariant_rest_positionals_null_implies_no_trailing_positionals() {
    let buffer = type_buffer("(Integer, ?String) -> void");
    let mt = parse_method_type(&buffer, 1, 1, &[]).expect("method type");
    assert!(mt.function.rest_positionals.is_none());
    assert!(mt.function.trailing_positionals.is_empty());
}

#[test]
fn invariant_type_name_kind_follows_case_class() {
    let buffer = type_buffer("Foo | _Bar | baz");
    let ty = parse_type(&buffer, 1, 1, &[]).expect("type");
    match ty {
        Type::Union { types, .. } => {
            let kinds: Vec<_> = types
                .iter()
                .map(|t| match t {
                    Type::ClassInstance { name, .. } => name.kind,
                    Type::Interface { name, .. } => name.kind,
                    Type::Alias { name, .. } => name.kind,
                    other => panic!("unexpected member type {other:?}"),
                })
                .collect();
            assert_eq!(kinds, vec![NameKind::Class, NameKind::Interface, NameKind::Alias]);
        }
        other => panic!("expected a union, got {other:?}"),
    }
}

#[test]
fn invariant_method_type_variable_resolves_against_outer_scope() {
    let buffer = type_buffer("(T) -> T");
    let mt = parse_method_type(&buffer, 1, 1, &[Symbol::intern("T")]).expect("method type");
    assert!(mt.type_params.is_empty());
    match mt.function.required_positionals.as_slice() {
        [param] => assert!(matches!(param.ty, Type::Variable { .. })),
        other => panic!("expected one param, got {other:?}"),
    }
    assert!(matches!(*mt.function.return_type, Type::Variable { .. }));
}

#[test]
fn declaration_range_positions_stay_within_the_buffer() {
    let buffer = type_buffer("FOO: Integer\n");
    let decls = parse_signature(&buffer, 1, 1).expect("decls");
    let range = decls[0].location().range();
    assert!(range.start.byte_offset <= range.end.byte_offset);
    assert!((range.end.byte_offset as usize) <= buffer.content().len());
}
