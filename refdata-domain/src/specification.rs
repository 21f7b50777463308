//! 规约（Specification）
//!
//! 以可组合的谓词描述记录筛选规则，例如列表中排除哨兵记录、
//! 仅保留当前用户创建的记录或仅保留启用且未删除的记录。
//!
use crate::entity::{Entity, UserId};
use crate::named::Named;
use std::marker::PhantomData;

pub trait Specification<T> {
    /// 检查候选对象是否满足规约
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    fn and<S>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        And(self, other)
    }

    fn or<S>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        Or(self, other)
    }

    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

// 借用与装箱的规约可直接参与组合
impl<T, S> Specification<T> for &S
where
    S: Specification<T> + ?Sized,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (**self).is_satisfied_by(candidate)
    }
}

impl<T, S> Specification<T> for Box<S>
where
    S: Specification<T> + ?Sized,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// 两者同时满足
pub struct And<A, B>(A, B);

impl<T, A, B> Specification<T> for And<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.0.is_satisfied_by(candidate) && self.1.is_satisfied_by(candidate)
    }
}

/// 任一满足
pub struct Or<A, B>(A, B);

impl<T, A, B> Specification<T> for Or<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.0.is_satisfied_by(candidate) || self.1.is_satisfied_by(candidate)
    }
}

pub struct Not<S>(S);

impl<T, S> Specification<T> for Not<S>
where
    S: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.0.is_satisfied_by(candidate)
    }
}

/// 任意记录均满足
pub struct AnyRecord<E>(PhantomData<fn(&E)>);

impl<E> Default for AnyRecord<E> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<E: Entity> Specification<E> for AnyRecord<E> {
    fn is_satisfied_by(&self, _: &E) -> bool {
        true
    }
}

/// 启用且未被逻辑删除
pub struct Active<E>(PhantomData<fn(&E)>);

impl<E> Default for Active<E> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<E: Entity> Specification<E> for Active<E> {
    fn is_satisfied_by(&self, candidate: &E) -> bool {
        let v = candidate.versioned();
        v.enabled && !v.deleted
    }
}

/// 由指定用户创建
pub struct CreatedBy<E> {
    user: UserId,
    _marker: PhantomData<fn(&E)>,
}

impl<E> CreatedBy<E> {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            _marker: PhantomData,
        }
    }
}

impl<E: Entity> Specification<E> for CreatedBy<E> {
    fn is_satisfied_by(&self, candidate: &E) -> bool {
        candidate.versioned().creation_user == Some(self.user)
    }
}

/// 名称为 `UNKNOWN` 的哨兵记录
pub struct Sentinel<E>(PhantomData<fn(&E)>);

impl<E> Default for Sentinel<E> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<E: Named> Specification<E> for Sentinel<E> {
    fn is_satisfied_by(&self, candidate: &E) -> bool {
        candidate.naming().is_sentinel()
    }
}
