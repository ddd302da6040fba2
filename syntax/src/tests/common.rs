macro_rules! assert_bin {
    ($e:expr, $op:pat) => {{
        match &($e).kind {
            ExprKind::Binary {
                op, left, right, ..
            } if matches!(op.node, $op) => (left.as_ref(), right.as_ref()),
            other => panic!("expected Binary({}), got {:?}", stringify!($op), other),
        }
    }};
}

macro_rules! assert_unary {
    ($e:expr) => {{
        match &($e).kind {
            ExprKind::Unary { expr, .. } => expr.as_ref(),
            other => panic!("expected Unary, got {:?}", other),
        }
    }};
}

macro_rules! assert_ident {
    ($e:expr, $name:expr) => {{
        match &($e).kind {
            ExprKind::Ident(sym) => assert_eq!(sym.text, $name),
            other => panic!("expected Ident, got {:?}", other),
        }
    }};
}

macro_rules! assert_lit_num {
    ($e:expr, $value:expr) => {{
        match &($e).kind {
            ExprKind::Lit(lit) if lit.kind == LitKind::Number => {
                assert_eq!(lit.symbol.text, $value.to_string());
            }
            other => panic!("expected Number literal, got {:?}", other),
        }
    }};
}

macro_rules! assert_lit_str {
    ($e:expr, $value:expr) => {{
        match &($e).kind {
            ExprKind::Lit(lit) if lit.kind == LitKind::String => {
                assert_eq!(lit.symbol.text, $value);
            }
            other => panic!("expected String literal, got {:?}", other),
        }
    }};
}

macro_rules! assert_positional {
    ($e:expr, $index:expr) => {{
        match &($e).kind {
            ExprKind::Positional(index) => assert_eq!(*index, $index),
            other => panic!("expected Positional, got {:?}", other),
        }
    }};
}

macro_rules! assert_call {
    ($e:expr, $callee:expr, $args:expr) => {{
        match &($e).kind {
            ExprKind::Call { callee, args, .. } => {
                assert_eq!(callee.text, $callee);
                assert_eq!(args.len(), $args);
                args
            }
            other => panic!("expected Call, got {:?}", other),
        }
    }};
}

macro_rules! assert_method_call {
    ($e:expr, $method:expr, $args:expr) => {{
        match &($e).kind {
            ExprKind::MethodCall {
                receiver,
                method,
                args,
                ..
            } => {
                assert_eq!(method.text, $method);
                assert_eq!(args.len(), $args);
                (receiver.as_ref(), args)
            }
            other => panic!("expected MethodCall, got {:?}", other),
        }
    }};
}

macro_rules! assert_list {
    ($e:expr, $items:expr) => {{
        match &($e).kind {
            ExprKind::List { items, .. } => {
                assert_eq!(items.len(), $items);
                items
            }
            other => panic!("expected List, got {:?}", other),
        }
    }};
}

pub(crate) use {
    assert_bin, assert_call, assert_ident, assert_list, assert_lit_num, assert_lit_str,
    assert_method_call, assert_positional, assert_unary,
};
